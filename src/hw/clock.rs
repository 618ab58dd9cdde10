// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Millisecond time source on the Cortex-M DWT cycle counter.
//!
//! The 32-bit cycle counter wraps after about 19.8 s at 216 MHz. Cycles are folded into a
//! millisecond count on every [`now_ms`](Monotonic::now_ms) call, so it has to be called at least
//! that often; the control loop calls it every iteration.

use cortex_m::peripheral::{DCB, DWT};

use crate::tracker::Monotonic;

pub struct DwtClock {
    _dwt: DWT,
    cycles_per_ms: u32,
    last_cycles: u32,
    /// Cycles not yet folded into `ms`.
    remainder: u32,
    ms: u32,
}

impl DwtClock {
    /// Enable tracing and start the cycle counter.
    ///
    /// `sysclk_hz` is the core clock, e.g. `clocks.sysclk().raw()`.
    pub fn new(dcb: &mut DCB, mut dwt: DWT, sysclk_hz: u32) -> Self {
        dcb.enable_trace();
        DWT::unlock();
        dwt.enable_cycle_counter();

        Self {
            _dwt: dwt,
            cycles_per_ms: (sysclk_hz / 1_000).max(1),
            last_cycles: DWT::cycle_count(),
            remainder: 0,
            ms: 0,
        }
    }
}

impl Monotonic for DwtClock {
    fn now_ms(&mut self) -> u32 {
        let now = DWT::cycle_count();
        let delta = now.wrapping_sub(self.last_cycles);
        self.last_cycles = now;

        let total = self.remainder as u64 + delta as u64;
        let whole_ms = total / self.cycles_per_ms as u64;
        self.remainder = (total % self.cycles_per_ms as u64) as u32;
        self.ms = self.ms.wrapping_add(whole_ms as u32);
        self.ms
    }
}
