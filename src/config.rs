// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Tunable constants and the tracker configuration.
//!
//! Every threshold the control loop depends on is a named value here rather than a literal in the
//! loop body. [`TrackerConfig::default`] reproduces the tuning the robot ships with.

use core::fmt;

/// Number of reflectance sensors on the array, left to right.
pub const SENSOR_COUNT: usize = 5;

/// Full-scale value of a calibrated sensor reading (darkest surface seen during calibration).
pub const CALIBRATED_MAX: u16 = 1000;

/// Calibrated reading at which a sensor is considered to see the line.
pub const DEFAULT_LINE_THRESHOLD: u16 = 600;

/// Speed commanded to the outer wheel. Lower values track tighter curves more reliably.
pub const DEFAULT_MAX_SPEED: f32 = 0.3;

/// Wheel speed of the in-place spin that sweeps the array during calibration.
pub const DEFAULT_CALIBRATION_SPEED: f32 = 0.2;

/// Smallest raw ADC spread a channel must see during calibration to be scaled by its own bounds.
pub const MIN_CALIBRATION_SPAN: u16 = 200;

/// Minimum time between two periodic telemetry records.
pub const DEFAULT_TRANSMIT_INTERVAL_MS: u32 = 50;

/// Serial link speed of the telemetry radio.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

// The position estimator uses the sensor at the center plus one neighbour on each side.
const _: () = assert!(SENSOR_COUNT >= 3);

/// Which side of the threshold means "line under this sensor".
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinePolarity {
    /// Dark line on a light floor: readings at or above the threshold see the line.
    DarkLine,

    /// Light line on a dark floor: readings below the threshold see the line.
    LightLine,
}

impl LinePolarity {
    /// Returns true if `reading` indicates the line for this polarity.
    #[inline]
    pub fn sees_line(self, reading: u16, threshold: u16) -> bool {
        match self {
            LinePolarity::DarkLine => reading >= threshold,
            LinePolarity::LightLine => reading < threshold,
        }
    }
}

/// Reasons a [`TrackerConfig`] is rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `max_speed` must lie in `(0, 1]`.
    MaxSpeedOutOfRange,

    /// `calibration_speed` must lie in `(0, 1]`.
    CalibrationSpeedOutOfRange,

    /// The periodic telemetry interval must be non-zero.
    ZeroTransmitInterval,

    /// The line threshold must lie within the calibrated range.
    ThresholdOutOfRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MaxSpeedOutOfRange => f.write_str("max speed must be in (0, 1]"),
            ConfigError::CalibrationSpeedOutOfRange => {
                f.write_str("calibration speed must be in (0, 1]")
            }
            ConfigError::ZeroTransmitInterval => f.write_str("transmit interval must be non-zero"),
            ConfigError::ThresholdOutOfRange => {
                write!(f, "line threshold must be at most {}", CALIBRATED_MAX)
            }
        }
    }
}

/// Control loop configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Calibrated reading separating "line" from "floor".
    pub line_threshold: u16,

    /// Direction in which `line_threshold` is crossed when the line is present.
    pub polarity: LinePolarity,

    /// Normalized speed of the outer wheel, in `(0, 1]`.
    pub max_speed: f32,

    /// Wheel speed while spinning over the line to calibrate, in `(0, 1]`.
    pub calibration_speed: f32,

    /// Minimum time between periodic telemetry records (ms).
    pub transmit_interval_ms: u32,

    /// Baud rate of the telemetry link.
    pub baud_rate: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            line_threshold: DEFAULT_LINE_THRESHOLD,
            polarity: LinePolarity::DarkLine,
            max_speed: DEFAULT_MAX_SPEED,
            calibration_speed: DEFAULT_CALIBRATION_SPEED,
            transmit_interval_ms: DEFAULT_TRANSMIT_INTERVAL_MS,
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

impl TrackerConfig {
    /// Set the line detection threshold.
    pub fn with_line_threshold(mut self, threshold: u16) -> Self {
        self.line_threshold = threshold;
        self
    }

    /// Set the line polarity.
    pub fn with_polarity(mut self, polarity: LinePolarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Set the outer-wheel speed.
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Set the spin speed of the calibration sweep.
    pub fn with_calibration_speed(mut self, speed: f32) -> Self {
        self.calibration_speed = speed;
        self
    }

    /// Set the periodic telemetry interval (ms).
    pub fn with_transmit_interval_ms(mut self, interval_ms: u32) -> Self {
        self.transmit_interval_ms = interval_ms;
        self
    }

    /// Set the telemetry baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Check that every value is usable by the control loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written so that NaN fails too.
        if !(self.max_speed > 0.0 && self.max_speed <= 1.0) {
            return Err(ConfigError::MaxSpeedOutOfRange);
        }
        if !(self.calibration_speed > 0.0 && self.calibration_speed <= 1.0) {
            return Err(ConfigError::CalibrationSpeedOutOfRange);
        }
        if self.transmit_interval_ms == 0 {
            return Err(ConfigError::ZeroTransmitInterval);
        }
        if self.line_threshold > CALIBRATED_MAX {
            return Err(ConfigError::ThresholdOutOfRange);
        }
        Ok(())
    }
}
