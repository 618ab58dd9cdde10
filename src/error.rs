// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error type shared by the adapters and the control loop.
//!
//! The loop has no recoverable errors of its own: a degenerate sensor reading is handled inside the
//! estimator and losing the line is a normal stop. Everything here is either a rejected
//! configuration, a phase operation called out of order, or a hardware adapter reporting a fault.
//! Adapter faults are propagated with `?` and never retried.

use core::fmt;

use crate::config::ConfigError;
use crate::tracker::Phase;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Tracker configuration failed validation.
    Config(ConfigError),

    /// An operation was called while the tracker was in the wrong phase.
    Phase { expected: Phase, found: Phase },

    /// The sensor array could not be read.
    Sensor,

    /// The motor driver rejected a command.
    Motor,

    /// The battery monitor could not be read.
    Battery,

    /// The output transport failed to accept a line.
    Transport,

    /// A formatted line did not fit the line buffer.
    LineOverflow,
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(err) => write!(f, "invalid configuration: {}", err),
            Error::Phase { expected, found } => {
                write!(f, "expected phase {:?}, tracker is {:?}", expected, found)
            }
            Error::Sensor => f.write_str("sensor read failed"),
            Error::Motor => f.write_str("motor command failed"),
            Error::Battery => f.write_str("battery read failed"),
            Error::Transport => f.write_str("serial write failed"),
            Error::LineOverflow => f.write_str("telemetry line exceeds buffer"),
        }
    }
}
