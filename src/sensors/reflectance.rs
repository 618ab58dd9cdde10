// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Analog reflectance sensor array.
//!
//! Each sensor is an IR LED / phototransistor pair wired to its own ADC channel. The output voltage
//! rises as less light is reflected, so a dark line reads higher than the floor.
//!
//! `ReadChannel` is a closure that returns the raw 12-bit ADC reading (0..4095) of sensor `i`,
//! counted left to right.

use embedded_hal::blocking::delay::DelayMs;

use crate::config::SENSOR_COUNT;
use crate::error::Error;
use crate::sensors::{Calibration, LineSensors, SensorReading, ADC_FULL_SCALE};

/// Samples taken by one calibration sweep unless overridden.
pub const DEFAULT_CALIBRATION_SAMPLES: u16 = 100;

/// Pause after each calibration sample (ms).
pub const DEFAULT_CALIBRATION_INTERVAL_MS: u32 = 10;

pub struct ReflectanceArray<ReadChannel, Delay> {
    read_channel: ReadChannel,
    delay: Delay,
    calibration: Calibration,
    sweep: Calibration,
    calibrated: bool,
    calibration_samples: u16,
    calibration_interval_ms: u32,
}

impl<ReadChannel, Delay> ReflectanceArray<ReadChannel, Delay>
where
    ReadChannel: FnMut(usize) -> u16,
    Delay: DelayMs<u32>,
{
    pub fn new(read_channel: ReadChannel, delay: Delay) -> Self {
        Self {
            read_channel,
            delay,
            calibration: Calibration::new(),
            sweep: Calibration::new(),
            calibrated: false,
            calibration_samples: DEFAULT_CALIBRATION_SAMPLES,
            calibration_interval_ms: DEFAULT_CALIBRATION_INTERVAL_MS,
        }
    }

    /// Change how many samples the calibration sweep takes and how far apart they are.
    pub fn with_calibration_sweep(mut self, samples: u16, interval_ms: u32) -> Self {
        self.calibration_samples = samples;
        self.calibration_interval_ms = interval_ms;
        self
    }

    /// Read every channel without calibration applied.
    pub fn read_raw(&mut self) -> [u16; SENSOR_COUNT] {
        let mut raw = [0u16; SENSOR_COUNT];
        for (i, slot) in raw.iter_mut().enumerate() {
            *slot = (self.read_channel)(i).min(ADC_FULL_SCALE);
        }
        raw
    }

    #[inline]
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    pub fn free(self) -> (ReadChannel, Delay) {
        (self.read_channel, self.delay)
    }
}

impl<ReadChannel, Delay> LineSensors for ReflectanceArray<ReadChannel, Delay>
where
    ReadChannel: FnMut(usize) -> u16,
    Delay: DelayMs<u32>,
{
    fn calibration_samples(&self) -> u16 {
        self.calibration_samples
    }

    fn begin_calibration(&mut self) {
        self.sweep = Calibration::new();
    }

    fn calibration_step(&mut self) -> Result<(), Error> {
        let raw = self.read_raw();
        self.sweep.record(&raw);
        self.delay.delay_ms(self.calibration_interval_ms);
        Ok(())
    }

    /// Adopt the sweep. Channels that saw too little contrast keep the ADC full scale.
    fn finish_calibration(&mut self) -> Result<(), Error> {
        for i in 0..SENSOR_COUNT {
            let (min, max) = self.sweep.bounds(i);
            debug!("sensor {}: min {} max {}", i + 1, min, max);
        }
        for i in self.sweep.weak_channels() {
            warn!("sensor {} saw no contrast, using ADC full scale", i + 1);
        }

        self.calibration = self.sweep;
        self.calibrated = true;
        Ok(())
    }

    /// Read the array. Uncalibrated channels are scaled by the ADC full scale.
    fn read_all(&mut self) -> Result<SensorReading, Error> {
        let raw = self.read_raw();
        Ok(self.calibration.normalize(&raw))
    }
}
