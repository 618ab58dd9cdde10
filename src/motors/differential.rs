// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Differential drive built from two independent motors.
//!
//! The motors are usually mounted mirrored, so one of them has to be driven with an inverted sign
//! for both wheels to roll forward. Inversion is configured once here and never leaks into the
//! control loop.

use crate::error::Error;
use crate::motors::{DriveMotors, Motor, MotorCommand};

pub struct DifferentialDrive<L, R> {
    left: L,
    right: R,
    invert_left: bool,
    invert_right: bool,
    last: MotorCommand,
}

impl<L: Motor, R: Motor> DifferentialDrive<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self {
            left,
            right,
            invert_left: false,
            invert_right: false,
            last: MotorCommand::STOP,
        }
    }

    /// Flip the sign of commands sent to either side.
    pub fn with_inversion(mut self, invert_left: bool, invert_right: bool) -> Self {
        self.invert_left = invert_left;
        self.invert_right = invert_right;
        self
    }

    /// Last command applied, after clamping.
    #[inline]
    pub fn last_command(&self) -> MotorCommand {
        self.last
    }

    pub fn left(&mut self) -> &mut L {
        &mut self.left
    }

    pub fn right(&mut self) -> &mut R {
        &mut self.right
    }

    pub fn free(self) -> (L, R) {
        (self.left, self.right)
    }
}

fn clamp_unit(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

impl<L: Motor, R: Motor> DriveMotors for DifferentialDrive<L, R> {
    fn set_speeds(&mut self, left: f32, right: f32) -> Result<(), Error> {
        let left = clamp_unit(left);
        let right = clamp_unit(right);

        self.left.set_speed(if self.invert_left { -left } else { left });
        self.right.set_speed(if self.invert_right { -right } else { right });

        self.last = MotorCommand::new(left, right);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Error> {
        self.left.brake();
        self.right.brake();
        self.last = MotorCommand::STOP;
        Ok(())
    }
}
