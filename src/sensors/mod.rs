// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Sensing
//!
//! Capabilities the control loop reads from, and generic adapters that implement them on top of raw
//! ADC channel readers.
//!
//! ## Modules
//!
//! - [`calibration`] - Per-channel min/max calibration and normalization to `0..=1000`.
//! - [`reflectance`] - Reflectance sensor array built on an ADC channel reader.
//! - [`battery`] - Battery voltage through a resistor divider.

pub mod battery;
pub mod calibration;
pub mod reflectance;

pub use battery::AnalogBattery;
pub use calibration::Calibration;
pub use reflectance::ReflectanceArray;

use crate::config::SENSOR_COUNT;
use crate::error::Error;

/// Full-scale raw value of the 12-bit ADC.
pub const ADC_FULL_SCALE: u16 = 4095;

/// One calibrated reading of every sensor, left to right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading([u16; SENSOR_COUNT]);

impl SensorReading {
    /// All sensors at zero.
    pub const ZERO: Self = Self([0; SENSOR_COUNT]);

    pub const fn new(values: [u16; SENSOR_COUNT]) -> Self {
        Self(values)
    }

    #[inline]
    pub fn values(&self) -> &[u16; SENSOR_COUNT] {
        &self.0
    }

    /// The center sensor and its immediate neighbours, as `[left, center, right]`.
    #[inline]
    pub fn central(&self) -> [u16; 3] {
        let c = SENSOR_COUNT / 2;
        [self.0[c - 1], self.0[c], self.0[c + 1]]
    }
}

impl From<[u16; SENSOR_COUNT]> for SensorReading {
    fn from(values: [u16; SENSOR_COUNT]) -> Self {
        Self(values)
    }
}

/// A calibratable line sensor array.
///
/// Calibration is split into steps so the caller can move the robot between samples. The array
/// only sees both line and floor if it is swept across the line while sampling.
pub trait LineSensors {
    /// Number of [`calibration_step`](LineSensors::calibration_step) calls a full sweep takes.
    fn calibration_samples(&self) -> u16;

    /// Discard any previous calibration data.
    fn begin_calibration(&mut self);

    /// Record one sample at the current pose. May block for the sample interval.
    fn calibration_step(&mut self) -> Result<(), Error>;

    /// Adopt the samples recorded since [`begin_calibration`](LineSensors::begin_calibration).
    fn finish_calibration(&mut self) -> Result<(), Error>;

    /// Read every sensor once.
    fn read_all(&mut self) -> Result<SensorReading, Error>;
}

/// Something that can report the supply voltage.
pub trait BatteryMonitor {
    fn battery_volts(&mut self) -> Result<f32, Error>;
}
