// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Rate-limited record emission.
//!
//! The reporter holds no time state of its own. It consumes the time the [`RunClock`] advanced
//! since the previous check, counts it off the transmit countdown and emits once the countdown is
//! used up. A forced report always emits. Either way the countdown restarts at the configured
//! interval, so unforced records are at least one interval apart.

use crate::config::TrackerConfig;
use crate::error::Error;
use crate::sensors::SensorReading;
use crate::telemetry::{LineWriter, TelemetryRecord};
use crate::tracker::RunClock;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TelemetryReporter {
    interval_ms: u32,
}

impl TelemetryReporter {
    pub fn new(interval_ms: u32) -> Self {
        Self { interval_ms }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.transmit_interval_ms)
    }

    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Emit a record if forced or if the countdown has run out.
    ///
    /// Returns whether a line was written.
    pub fn maybe_report<W: LineWriter>(
        &self,
        clock: &mut RunClock,
        position: f32,
        sensors: &SensorReading,
        force: bool,
        out: &mut W,
    ) -> Result<bool, Error> {
        let delta_ms = clock.take_unreported_ms();
        if !force {
            clock.count_down(delta_ms);
            if clock.countdown_ms() > 0 {
                return Ok(false);
            }
        }

        let record = TelemetryRecord::new(clock.elapsed_s(), position, *sensors);
        let line = record.to_line()?;
        out.write_line(&line)?;

        clock.restart_countdown(self.interval_ms);
        Ok(true)
    }
}
