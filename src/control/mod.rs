// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! The two pure stages of the control loop, plus the spin that sweeps the array during calibration.
//!
//! ## Modules
//!
//! - [`position`] - Sensor readings to a signed centerline offset and an on-track flag.
//! - [`steering`] - Centerline offset to proportional differential wheel speeds.
//! - [`sweep`] - Spin-in-place commands for the calibration sweep.

pub mod position;
pub mod steering;
pub mod sweep;

pub use position::{Estimate, PositionEstimator};
pub use steering::compute_speeds;
pub use sweep::calibration_spin;
