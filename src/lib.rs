// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Line-Dancer Firmware
//!
//! This crate contains the firmware for a two-wheeled line-following robot, written in Rust,
//! targeting an STM32F777 MCU. The robot reads a five-sensor reflectance array, steers
//! proportionally toward the line, and streams fixed-width telemetry over a serial radio until it
//! runs off the end of the track.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Named tuning constants and [`TrackerConfig`](config::TrackerConfig) |
//! | [`sensors`] | Reflectance array, calibration, battery monitor |
//! | [`drivers`] | Device-level drivers (PWM H-bridge) |
//! | [`motors`] | Differential drive and the [`DriveMotors`](motors::DriveMotors) interface |
//! | [`control`] | Position estimation, proportional steering and the calibration spin |
//! | [`telemetry`] | Wire format, rate-limited reporter, serial writer |
//! | [`tracker`] | The control loop state machine |
//! | `hw` | MCU-level wrappers around ADC, DWT, LEDs and pins (`firmware` feature) |
//!
//! Everything outside `hw` is hardware independent and is unit tested on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features firmware --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod motors;
pub mod sensors;
pub mod telemetry;
pub mod tracker;

#[cfg(feature = "firmware")]
pub mod hw;

pub use config::TrackerConfig;
pub use error::Error;
pub use tracker::{LineTracker, Phase, RunSummary};
