// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Telemetry
//!
//! Fixed-width status lines sent to the PC over the serial radio.
//!
//! A header block is written once at boot, then one record per emission:
//!
//! ```text
//! |___TIM___|___PRX___|_SN-1_|_SN-2_|_SN-3_|_SN-4_|_SN-5_|
//! |         |         |      |      |      |      |      |
//! |     0.05|     0.44|     0|   200|   500|   900|     0|
//! ```
//!
//! Every line is fully formatted into a bounded buffer before anything is written, so the transport
//! only ever sees complete lines.
//!
//! ## Modules
//!
//! - [`record`] - One status record and its wire format.
//! - [`header`] - Title, battery, legend and column header lines.
//! - [`reporter`] - Rate-limited emission driven by the run clock.
//! - [`serial`] - Line writer over an `embedded-hal` serial transmitter.

pub mod header;
pub mod record;
pub mod reporter;
pub mod serial;

pub use record::TelemetryRecord;
pub use reporter::TelemetryReporter;
pub use serial::SerialWriter;

use crate::error::Error;

/// Room for the longest line written: header legend or a five-sensor record.
pub const LINE_CAPACITY: usize = 96;

/// One formatted output line, without terminator.
pub type Line = heapless::String<LINE_CAPACITY>;

/// Append-only line transport.
pub trait LineWriter {
    /// Write `line` followed by CRLF.
    fn write_line(&mut self, line: &str) -> Result<(), Error>;
}

impl<W: LineWriter + ?Sized> LineWriter for &mut W {
    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        (**self).write_line(line)
    }
}
