// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status LEDs.
//!
//! The robot has no display, so boot progress and the final outcome are shown on three LEDs. The
//! boot sweep is a fixed sequence of blocking delays that finishes before tracking starts.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

/// Whether the LED is driven active-high or active-low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

pub struct Led<PIN: OutputPin> {
    pin: PIN,
    active: ActiveLevel,
    is_on: bool,
}

impl<PIN: OutputPin> Led<PIN> {
    /// Create an LED wrapper, initializing it to OFF.
    pub fn new(pin: PIN, active: ActiveLevel) -> Self {
        let mut led = Self {
            pin,
            active,
            is_on: true,
        };
        led.set(false);
        led
    }

    pub fn active_low(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    /// Drive the LED logically ON (true) or OFF (false). GPIO errors are ignored.
    pub fn set(&mut self, on: bool) {
        let high = on == (self.active == ActiveLevel::High);
        let _ = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        self.is_on = on;
    }

    #[inline]
    pub fn on(&mut self) {
        self.set(true);
    }

    #[inline]
    pub fn off(&mut self) {
        self.set(false);
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.is_on
    }
}

/// Walk a lit LED across `leds` `rounds` times, `step_ms` per position, then leave them all off.
pub fn boot_sweep<PIN, D>(leds: &mut [&mut Led<PIN>], delay: &mut D, rounds: u8, step_ms: u32)
where
    PIN: OutputPin,
    D: DelayMs<u32>,
{
    for _ in 0..rounds {
        for led in leds.iter_mut() {
            led.on();
            delay.delay_ms(step_ms);
            led.off();
        }
    }
}
