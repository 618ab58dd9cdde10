// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Proportional differential steering.
//!
//! One wheel always runs at `max_speed`; the other is slowed in proportion to the offset:
//!
//! | position | left                     | right                    |
//! | -------- | ------------------------ | ------------------------ |
//! | `p >= 0` | `max_speed * (1 - p)`    | `max_speed`              |
//! | `p < 0`  | `max_speed`              | `max_speed * (1 + p)`    |
//!
//! Both speeds stay within `[0, max_speed]`.

use crate::motors::MotorCommand;

/// Map a centerline offset to wheel speeds.
///
/// `position` is clamped to `[-1, 1]`; a non-finite position steers straight.
pub fn compute_speeds(position: f32, max_speed: f32) -> MotorCommand {
    let p = if position.is_finite() {
        position.clamp(-1.0, 1.0)
    } else {
        0.0
    };

    if p >= 0.0 {
        MotorCommand::new(max_speed * (1.0 - p), max_speed)
    } else {
        MotorCommand::new(max_speed, max_speed * (1.0 + p))
    }
}
