// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # MCU-Level Wrappers
//!
//! STM32F777-specific pieces. Only built with the `firmware` feature.
//!
//! - [`adc`] - Blocking single-channel ADC1 reads for the sensors and battery tap.
//! - [`clock`] - Millisecond time source on the DWT cycle counter.
//! - [`led`] - Status LEDs and the boot sweep.
//! - [`pins`] - Board pin assignment.

pub mod adc;
pub mod clock;
pub mod led;
pub mod pins;

pub use adc::Adc;
pub use clock::DwtClock;
pub use led::Led;
pub use pins::BoardPins;
