// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-input PWM H-bridge (DRV8833 / DRV8873 in PWM mode / TB6612 style).
//!
//! Each motor terminal is driven by one PWM channel:
//!
//! | IN1  | IN2  | Result  |
//! | ---- | ---- | ------- |
//! | PWM  | 0    | Forward |
//! | 0    | PWM  | Reverse |
//! | 1    | 1    | Brake   |
//! | 0    | 0    | Coast   |

use embedded_hal::PwmPin;
use micromath::F32Ext;

use crate::motors::Motor;

/// Speeds with a smaller magnitude than this are treated as a stop request.
const DEADBAND: f32 = 0.001;

/// Logical drive direction for the bridge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Reverse,
    Brake,
    Coast,
}

pub struct HBridge<Pwm1, Pwm2> {
    in1: Pwm1,
    in2: Pwm2,
    direction: Direction,
    current_speed: f32,
}

impl<Pwm1, Pwm2> HBridge<Pwm1, Pwm2>
where
    Pwm1: PwmPin<Duty = u16>,
    Pwm2: PwmPin<Duty = u16>,
{
    /// Wrap two PWM channels. The bridge starts coasting.
    pub fn new(mut in1: Pwm1, mut in2: Pwm2) -> Self {
        in1.set_duty(0);
        in2.set_duty(0);
        in1.enable();
        in2.enable();
        Self {
            in1,
            in2,
            direction: Direction::Coast,
            current_speed: 0.0,
        }
    }

    /// Set the motor speed and direction.
    ///
    /// `speed` - A float from -1.0 (full reverse) to 1.0 (full forward). Near-zero speeds brake.
    pub fn set_speed(&mut self, speed: f32) {
        let speed = if speed.is_finite() {
            speed.clamp(-1.0, 1.0)
        } else {
            0.0
        };

        // Assuming both channels share a timer and so a resolution.
        let max_duty = self.in1.get_max_duty();
        let duty = (F32Ext::abs(speed) * max_duty as f32) as u16;

        if speed > DEADBAND {
            self.in1.set_duty(duty);
            self.in2.set_duty(0);
            self.direction = Direction::Forward;
        } else if speed < -DEADBAND {
            self.in1.set_duty(0);
            self.in2.set_duty(duty);
            self.direction = Direction::Reverse;
        } else {
            self.brake();
            return;
        }
        self.current_speed = speed;
    }

    /// Short the motor terminals.
    pub fn brake(&mut self) {
        let max = self.in1.get_max_duty();
        self.in1.set_duty(max);
        self.in2.set_duty(self.in2.get_max_duty());
        self.direction = Direction::Brake;
        self.current_speed = 0.0;
    }

    /// Let the motor spin freely.
    pub fn coast(&mut self) {
        self.in1.set_duty(0);
        self.in2.set_duty(0);
        self.direction = Direction::Coast;
        self.current_speed = 0.0;
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Disable both channels and return them.
    pub fn free(mut self) -> (Pwm1, Pwm2) {
        self.in1.disable();
        self.in2.disable();
        (self.in1, self.in2)
    }
}

impl<Pwm1, Pwm2> Motor for HBridge<Pwm1, Pwm2>
where
    Pwm1: PwmPin<Duty = u16>,
    Pwm2: PwmPin<Duty = u16>,
{
    fn set_speed(&mut self, speed: f32) {
        HBridge::set_speed(self, speed);
    }

    fn brake(&mut self) {
        HBridge::brake(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// PWM channel that remembers its duty.
    #[derive(Debug, Default)]
    struct FakePwm {
        duty: u16,
        enabled: bool,
    }

    impl PwmPin for FakePwm {
        type Duty = u16;

        fn disable(&mut self) {
            self.enabled = false;
        }

        fn enable(&mut self) {
            self.enabled = true;
        }

        fn get_duty(&self) -> u16 {
            self.duty
        }

        fn get_max_duty(&self) -> u16 {
            1000
        }

        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }
    }

    fn bridge() -> HBridge<FakePwm, FakePwm> {
        HBridge::new(FakePwm::default(), FakePwm::default())
    }

    #[test]
    fn starts_coasting_with_channels_enabled() {
        let b = bridge();
        assert_eq!(b.direction(), Direction::Coast);
        let (in1, in2) = (&b.in1, &b.in2);
        assert!(in1.enabled && in2.enabled);
        assert_eq!((in1.duty, in2.duty), (0, 0));
    }

    #[test]
    fn forward_and_reverse_drive_one_input() {
        let mut b = bridge();
        b.set_speed(0.25);
        assert_eq!((b.in1.duty, b.in2.duty), (250, 0));
        assert_eq!(b.direction(), Direction::Forward);

        b.set_speed(-0.5);
        assert_eq!((b.in1.duty, b.in2.duty), (0, 500));
        assert_eq!(b.direction(), Direction::Reverse);
    }

    #[test]
    fn out_of_range_is_clamped_and_zero_brakes() {
        let mut b = bridge();
        b.set_speed(3.0);
        assert_eq!(b.in1.duty, 1000);
        assert_eq!(b.current_speed(), 1.0);

        b.set_speed(0.0);
        assert_eq!((b.in1.duty, b.in2.duty), (1000, 1000));
        assert_eq!(b.direction(), Direction::Brake);

        b.set_speed(f32::NAN);
        assert_eq!(b.direction(), Direction::Brake);
    }

    #[test]
    fn free_disables_channels() {
        let mut b = bridge();
        b.coast();
        let (in1, in2) = b.free();
        assert!(!in1.enabled && !in2.enabled);
    }
}
