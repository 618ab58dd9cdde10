// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application logic. They are written against `embedded-hal` traits so they build and test on the
//! host as well.
//!
//! ## Existing drivers
//!
//! - [`h_bridge`] – two-input PWM H-bridge

pub mod h_bridge;

pub use h_bridge::HBridge;
