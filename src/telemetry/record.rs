// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status record wire format.
//!
//! `|<elapsed s, 9.2>|<position, 9.2>|<sensor, 6>|...|`, right-aligned, CRLF added by the writer.

use core::fmt::{self, Write};

use crate::error::Error;
use crate::sensors::SensorReading;
use crate::telemetry::Line;

/// Width of the two floating point columns.
pub const FLOAT_WIDTH: usize = 9;

/// Width of each sensor column.
pub const SENSOR_WIDTH: usize = 6;

/// Snapshot of the robot state at one emission.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TelemetryRecord {
    pub elapsed_s: f32,
    pub position: f32,
    pub sensors: SensorReading,
}

impl TelemetryRecord {
    pub fn new(elapsed_s: f32, position: f32, sensors: SensorReading) -> Self {
        Self {
            elapsed_s,
            position,
            sensors,
        }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> fmt::Result {
        write!(
            w,
            "|{:>fw$.2}|{:>fw$.2}|",
            self.elapsed_s,
            self.position,
            fw = FLOAT_WIDTH
        )?;
        for value in self.sensors.values() {
            write!(w, "{:>sw$}|", value, sw = SENSOR_WIDTH)?;
        }
        Ok(())
    }

    /// Format into a line buffer. Fails instead of truncating.
    pub fn to_line(&self) -> Result<Line, Error> {
        let mut line = Line::new();
        self.write_to(&mut line).map_err(|_| Error::LineOverflow)?;
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_fixed_width_layout() {
        let record = TelemetryRecord::new(1.234, 0.4375, SensorReading::new([0, 200, 500, 900, 0]));
        let line = record.to_line().unwrap();
        assert_eq!(
            line.as_str(),
            "|     1.23|     0.44|     0|   200|   500|   900|     0|"
        );
    }

    #[test]
    fn negative_positions_keep_their_width() {
        let record = TelemetryRecord::new(12.5, -1.0, SensorReading::new([1000; 5]));
        let line = record.to_line().unwrap();
        assert_eq!(
            line.as_str(),
            "|    12.50|    -1.00|  1000|  1000|  1000|  1000|  1000|"
        );
    }

    #[test]
    fn identical_inputs_differ_only_in_elapsed_time() {
        let sensors = SensorReading::new([3, 600, 800, 601, 7]);
        let a = TelemetryRecord::new(0.10, 0.25, sensors).to_line().unwrap();
        let b = TelemetryRecord::new(97.35, 0.25, sensors).to_line().unwrap();

        assert_eq!(a.len(), b.len());
        assert_eq!(a[FLOAT_WIDTH + 1..], b[FLOAT_WIDTH + 1..]);
        assert_ne!(a[..FLOAT_WIDTH + 1], b[..FLOAT_WIDTH + 1]);
    }
}
