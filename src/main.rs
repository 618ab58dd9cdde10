// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
#[cfg(feature = "defmt")]
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use linedancer::{
    drivers::HBridge,
    hw::{
        adc::{BATTERY_CHANNEL, SENSOR_CHANNELS},
        led, Adc, BoardPins, DwtClock, Led,
    },
    motors::DifferentialDrive,
    sensors::{AnalogBattery, ReflectanceArray},
    telemetry::SerialWriter,
    LineTracker, TrackerConfig,
};

/// 20k / 10k divider on the battery tap.
const BATTERY_DIVIDER_RATIO: f32 = 3.0;

/// H-bridge PWM carrier, above the audible range.
const MOTOR_PWM_KHZ: u32 = 20;

/// Settle time after power-up before the boot sweep.
const POWER_UP_SETTLE_MS: u32 = 500;

const BOOT_SWEEP_ROUNDS: u8 = 2;
const BOOT_SWEEP_STEP_MS: u32 = 150;

#[entry]
fn main() -> ! {
    let config = TrackerConfig::default();

    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let mut cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(216.MHz()).freeze();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);

    // LEDs
    let mut led_red = Led::active_low(pins.leds.red);
    let mut led_yellow = Led::active_low(pins.leds.yellow);
    let mut led_green = Led::active_low(pins.leds.green);

    // USART1 to the serial radio
    let usart_cfg = Config {
        baud_rate: config.baud_rate.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        usart_cfg,
    );
    let (tx, _rx) = serial.split();
    let out = SerialWriter::new(tx);

    // TIM4 PWM into both H-bridges. The right motor is mounted mirrored.
    let (left_in1, left_in2, right_in1, right_in2) = dp.TIM4.pwm(
        (
            pins.motors.left_in1,
            pins.motors.left_in2,
            pins.motors.right_in1,
            pins.motors.right_in2,
        ),
        MOTOR_PWM_KHZ.kHz(),
        &clocks,
    );
    let motors = DifferentialDrive::new(
        HBridge::new(left_in1, left_in2),
        HBridge::new(right_in1, right_in2),
    )
    .with_inversion(false, true);

    // ADC1: sensors and battery tap share the converter.
    let _sensor_pins = pins.sensors;
    let adc = RefCell::new(Adc::adc1(dp.ADC1));
    let mut battery = AnalogBattery::new(
        || adc.borrow_mut().read(BATTERY_CHANNEL),
        BATTERY_DIVIDER_RATIO,
    );

    let clock = DwtClock::new(&mut cp.DCB, cp.DWT, clocks.sysclk().raw());

    // SysTick delay from cortex-m, needs core clock in Hz (u32)
    let mut delay = Delay::new(cp.SYST, clocks.sysclk().raw());

    // Boot sweep; the delay then moves into the sensor array for the calibration sweep.
    delay.delay_ms(POWER_UP_SETTLE_MS);
    led::boot_sweep(
        &mut [&mut led_red, &mut led_yellow, &mut led_green],
        &mut delay,
        BOOT_SWEEP_ROUNDS,
        BOOT_SWEEP_STEP_MS,
    );
    led_yellow.on();

    let sensors = ReflectanceArray::new(
        |i: usize| adc.borrow_mut().read(SENSOR_CHANNELS[i]),
        delay,
    );

    let result = LineTracker::new(sensors, motors, out, clock, config)
        .and_then(|mut tracker| tracker.run(&mut battery));

    led_yellow.off();
    match result {
        Ok(_summary) => led_green.on(),
        Err(_err) => led_red.on(),
    }

    loop {
        cortex_m::asm::wfi();
    }
}
