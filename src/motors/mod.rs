// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Actuator Abstractions
//!
//! This module contains the drive-level interface the control loop talks to, and a motor-level
//! wrapper that sits above the device drivers in `drivers`.
//!
//! ## Modules
//!
//! - [`differential`] - Left/right motor pair implementing [`DriveMotors`].

pub mod differential;

pub use differential::DifferentialDrive;

use crate::error::Error;

/// Normalized left/right wheel speeds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    pub left: f32,
    pub right: f32,
}

impl MotorCommand {
    /// Both wheels stopped.
    pub const STOP: Self = Self {
        left: 0.0,
        right: 0.0,
    };

    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Both wheels at `speed`.
    pub const fn straight(speed: f32) -> Self {
        Self {
            left: speed,
            right: speed,
        }
    }
}

/// A single speed-controlled motor.
pub trait Motor {
    /// `speed` in `[-1.0, 1.0]`.
    fn set_speed(&mut self, speed: f32);

    /// Actively stop.
    fn brake(&mut self);
}

/// A differential drive base.
pub trait DriveMotors {
    /// Command both wheels. Out-of-range values are clamped by the implementation.
    fn set_speeds(&mut self, left: f32, right: f32) -> Result<(), Error>;

    fn apply(&mut self, command: MotorCommand) -> Result<(), Error> {
        self.set_speeds(command.left, command.right)
    }

    fn stop(&mut self) -> Result<(), Error> {
        self.apply(MotorCommand::STOP)
    }
}
