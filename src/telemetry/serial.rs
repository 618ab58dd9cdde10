// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial line writer.
//!
//! Wraps the transmit half of a USART (or any `embedded-hal` serial writer) and writes whole
//! CRLF-terminated lines, blocking on each byte until the peripheral accepts it.
//!
//! To watch the stream on the host, attach the radio receiver and use
//! ```text
//! $ screen /dev/ttyACM0 115200
//! ```

use embedded_hal::serial::Write;
use nb::block;

use crate::error::Error;
use crate::telemetry::LineWriter;

pub struct SerialWriter<Tx> {
    tx: Tx,
}

impl<Tx: Write<u8>> SerialWriter<Tx> {
    pub fn new(tx: Tx) -> Self {
        Self { tx }
    }

    #[inline]
    fn write_byte(&mut self, b: u8) -> Result<(), Error> {
        block!(self.tx.write(b)).map_err(|_| Error::Transport)
    }

    fn write_str(&mut self, s: &str) -> Result<(), Error> {
        for &b in s.as_bytes() {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) -> Result<(), Error> {
        self.write_str(s)?;
        self.write_str("\r\n")
    }

    pub fn free(self) -> Tx {
        self.tx
    }
}

impl<Tx: Write<u8>> LineWriter for SerialWriter<Tx> {
    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        self.println(line)
    }
}
