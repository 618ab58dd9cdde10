// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 line follower board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, Alternate, Analog, ErasedPin, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub usart1: Usart1Pins,
    pub sensors: SensorPins,
    pub motors: MotorPins,
}

/// Status LEDs, type-erased so they can be swept as a group.
pub struct LedPins {
    pub red: ErasedPin<Output<PushPull>>,
    pub yellow: ErasedPin<Output<PushPull>>,
    pub green: ErasedPin<Output<PushPull>>,
}

/// USART1 TX/RX to the serial radio.
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// Reflectance sensor outputs (left to right) and the battery divider tap.
pub struct SensorPins {
    pub s1: gpioa::PA0<Analog>, // ADC1_IN0
    pub s2: gpioa::PA1<Analog>, // ADC1_IN1
    pub s3: gpioa::PA2<Analog>, // ADC1_IN2
    pub s4: gpioa::PA3<Analog>, // ADC1_IN3
    pub s5: gpioa::PA4<Analog>, // ADC1_IN4
    pub battery: gpioc::PC0<Analog>, // ADC1_IN10
}

/// H-bridge inputs, all on TIM4.
pub struct MotorPins {
    pub left_in1: gpiod::PD12<Alternate<2>>,  // TIM4_CH1 (PWM)
    pub left_in2: gpiod::PD13<Alternate<2>>,  // TIM4_CH2 (PWM)
    pub right_in1: gpiod::PD14<Alternate<2>>, // TIM4_CH3 (PWM)
    pub right_in2: gpiod::PD15<Alternate<2>>, // TIM4_CH4 (PWM)
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();

        Self {
            leds: LedPins {
                red: gpiod.pd8.into_push_pull_output().erase(),
                yellow: gpiod.pd9.into_push_pull_output().erase(),
                green: gpiod.pd10.into_push_pull_output().erase(),
            },

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            sensors: SensorPins {
                s1: gpioa.pa0.into_analog(),
                s2: gpioa.pa1.into_analog(),
                s3: gpioa.pa2.into_analog(),
                s4: gpioa.pa3.into_analog(),
                s5: gpioa.pa4.into_analog(),
                battery: gpioc.pc0.into_analog(),
            },

            motors: MotorPins {
                left_in1: gpiod.pd12.into_alternate::<2>(),
                left_in2: gpiod.pd13.into_alternate::<2>(),
                right_in1: gpiod.pd14.into_alternate::<2>(),
                right_in2: gpiod.pd15.into_alternate::<2>(),
            },
        }
    }
}
