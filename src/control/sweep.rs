// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! In-place spin used to sweep the sensor array over the line while calibrating.
//!
//! The sweep is split into quarters: spin right, spin left for two quarters, then right again.
//! With an even split the robot ends up facing the way it started, and every sensor passes over
//! the line and the floor on both sides of it.

use crate::motors::MotorCommand;

/// Wheel speeds for calibration sample `sample` out of `samples`.
pub fn calibration_spin(sample: u16, samples: u16, speed: f32) -> MotorCommand {
    let quarter = (sample as u32 * 4) / samples.max(1) as u32;
    match quarter {
        1 | 2 => MotorCommand::new(-speed, speed),
        _ => MotorCommand::new(speed, -speed),
    }
}
