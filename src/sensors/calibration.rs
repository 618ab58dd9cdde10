// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Min/max calibration for reflectance sensors.
//!
//! While calibrating, the robot spins in place so every sensor crosses both line and floor, and
//! every raw sample is recorded. Afterwards each channel is scaled so its darkest sample maps to
//! [`CALIBRATED_MAX`] and its lightest to 0. This removes per-sensor gain and ambient light
//! differences before the readings reach the estimator.
//!
//! A channel whose raw span stayed below [`MIN_CALIBRATION_SPAN`] only saw noise. Stretching that
//! noise to the full calibrated range would make the bare floor read as line, so such a channel
//! keeps the plain ADC full-scale mapping instead.

use crate::config::{CALIBRATED_MAX, MIN_CALIBRATION_SPAN, SENSOR_COUNT};
use crate::sensors::{SensorReading, ADC_FULL_SCALE};

/// Observed raw bounds per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Calibration {
    min: [u16; SENSOR_COUNT],
    max: [u16; SENSOR_COUNT],
    samples: u32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new()
    }
}

impl Calibration {
    /// Empty calibration; every channel uses the ADC full scale until samples are recorded.
    pub const fn new() -> Self {
        Self {
            min: [u16::MAX; SENSOR_COUNT],
            max: [0; SENSOR_COUNT],
            samples: 0,
        }
    }

    /// Widen the per-channel bounds with one raw sample.
    pub fn record(&mut self, raw: &[u16; SENSOR_COUNT]) {
        for (i, &value) in raw.iter().enumerate() {
            self.min[i] = self.min[i].min(value);
            self.max[i] = self.max[i].max(value);
        }
        self.samples = self.samples.saturating_add(1);
    }

    #[inline]
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Raw `(min, max)` seen on `channel`.
    pub fn bounds(&self, channel: usize) -> (u16, u16) {
        (self.min[channel], self.max[channel])
    }

    /// Raw spread seen on `channel`, 0 if nothing was recorded.
    pub fn span(&self, channel: usize) -> u16 {
        self.max[channel].saturating_sub(self.min[channel])
    }

    /// True if `channel` saw enough contrast to be scaled by its own bounds.
    #[inline]
    pub fn has_contrast(&self, channel: usize) -> bool {
        self.span(channel) >= MIN_CALIBRATION_SPAN
    }

    /// Channels without enough contrast, left to right.
    pub fn weak_channels(&self) -> impl Iterator<Item = usize> + '_ {
        (0..SENSOR_COUNT).filter(move |&i| !self.has_contrast(i))
    }

    /// Scale a raw sample into `0..=CALIBRATED_MAX`.
    pub fn normalize(&self, raw: &[u16; SENSOR_COUNT]) -> SensorReading {
        let mut out = [0u16; SENSOR_COUNT];
        for (i, slot) in out.iter_mut().enumerate() {
            let (min, max) = if self.has_contrast(i) {
                (self.min[i], self.max[i])
            } else {
                (0, ADC_FULL_SCALE)
            };
            let span = (max - min) as u32;
            let value = (raw[i].clamp(min, max) - min) as u32;
            *slot = (value * CALIBRATED_MAX as u32 / span) as u16;
        }
        SensorReading::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swept() -> Calibration {
        let mut cal = Calibration::new();
        cal.record(&[100, 200, 300, 400, 500]);
        cal.record(&[1100, 2200, 3300, 4095, 1500]);
        cal
    }

    #[test]
    fn empty_calibration_uses_adc_full_scale() {
        let cal = Calibration::new();
        assert_eq!(cal.weak_channels().count(), SENSOR_COUNT);
        assert_eq!(cal.span(0), 0);

        let r = cal.normalize(&[0, 4095, 2048, 409, 4095]);
        assert_eq!(r.values(), &[0, 1000, 500, 99, 1000]);
    }

    #[test]
    fn normalizes_between_recorded_bounds() {
        let cal = swept();
        assert_eq!(cal.weak_channels().count(), 0);
        assert_eq!(cal.samples(), 2);

        let r = cal.normalize(&[100, 2200, 1800, 2248, 1000]);
        assert_eq!(r.values(), &[0, 1000, 500, 500, 500]);
    }

    #[test]
    fn clamps_samples_outside_the_bounds() {
        let cal = swept();
        let r = cal.normalize(&[0, 4095, 0, 0, 4095]);
        assert_eq!(r.values(), &[0, 1000, 0, 0, 1000]);
    }

    #[test]
    fn noise_only_channels_are_not_stretched() {
        // Robot standing still over the floor: a few LSB of jitter and nothing else.
        let mut cal = Calibration::new();
        for raw in [298, 302, 300, 299, 301] {
            cal.record(&[raw; SENSOR_COUNT]);
        }
        assert_eq!(cal.weak_channels().count(), SENSOR_COUNT);

        for raw in [298, 302] {
            let r = cal.normalize(&[raw; SENSOR_COUNT]);
            assert!(r.values().iter().all(|&v| v < 100), "{:?}", r);
        }
    }

    #[test]
    fn marginal_channel_falls_back_alone() {
        let mut cal = Calibration::new();
        cal.record(&[300, 300, 300, 300, 300]);
        cal.record(&[3000, 3000, 300 + MIN_CALIBRATION_SPAN - 1, 3000, 3000]);

        assert_eq!(cal.weak_channels().collect::<Vec<_>>(), vec![2]);
        assert!(cal.has_contrast(1));

        let r = cal.normalize(&[3000, 3000, 400, 300, 1650]);
        assert_eq!(r.values(), &[1000, 1000, 97, 0, 500]);
    }
}
