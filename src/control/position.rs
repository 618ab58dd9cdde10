// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Track position estimation from the central sensors.
//!
//! Only the center sensor and its two neighbours are used. With readings `l`, `c`, `r`:
//!
//! ```text
//! position = (r - l) / (l + c + r)
//! ```
//!
//! which lies in `[-1, 1]`. Negative means the line is left of center, positive right of center.
//! When all three read zero there is nothing to divide by; the position is then reported as 0 and
//! the estimate is flagged degenerate.

use crate::config::{LinePolarity, TrackerConfig};
use crate::sensors::SensorReading;

/// Output of one estimation step.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Estimate {
    /// Lateral offset of the line in `[-1, 1]`.
    pub position: f32,

    /// At least one central sensor sees the line.
    pub on_track: bool,

    /// The central sensors summed to zero and `position` was substituted.
    pub degenerate: bool,
}

impl Estimate {
    /// Centered, on track. The state assumed right after calibration.
    pub const CENTERED: Self = Self {
        position: 0.0,
        on_track: true,
        degenerate: false,
    };
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PositionEstimator {
    threshold: u16,
    polarity: LinePolarity,
}

impl PositionEstimator {
    pub fn new(threshold: u16, polarity: LinePolarity) -> Self {
        Self {
            threshold,
            polarity,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.line_threshold, config.polarity)
    }

    pub fn estimate(&self, reading: &SensorReading) -> Estimate {
        let [left, center, right] = reading.central();

        let on_track = [left, center, right]
            .iter()
            .any(|&v| self.polarity.sees_line(v, self.threshold));

        let sum = left as u32 + center as u32 + right as u32;
        if sum == 0 {
            return Estimate {
                position: 0.0,
                on_track,
                degenerate: true,
            };
        }

        let position = (right as f32 - left as f32) / sum as f32;
        Estimate {
            position,
            on_track,
            degenerate: false,
        }
    }
}
