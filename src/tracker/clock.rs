// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Run time bookkeeping.

/// Free-running millisecond time source. Wrapping is allowed; only differences are used.
pub trait Monotonic {
    fn now_ms(&mut self) -> u32;
}

/// Elapsed run time plus the countdown to the next periodic telemetry record.
///
/// Started once when tracking begins and owned by the tracker. Time advanced through
/// [`advance`](Self::advance) is accumulated into the elapsed total and also held as "unreported"
/// until the telemetry reporter next takes it off the countdown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunClock {
    elapsed_ms: u32,
    countdown_ms: i32,
    unreported_ms: u32,
}

impl RunClock {
    /// Zero elapsed time, countdown at `interval_ms`.
    pub fn start(interval_ms: u32) -> Self {
        let mut clock = Self::default();
        clock.restart_countdown(interval_ms);
        clock
    }

    /// Account for `delta_ms` of run time.
    pub fn advance(&mut self, delta_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        self.unreported_ms = self.unreported_ms.saturating_add(delta_ms);
    }

    #[inline]
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    #[inline]
    pub fn elapsed_s(&self) -> f32 {
        self.elapsed_ms as f32 * 0.001
    }

    #[inline]
    pub fn countdown_ms(&self) -> i32 {
        self.countdown_ms
    }

    /// Time advanced since the last call, resetting it to zero.
    pub fn take_unreported_ms(&mut self) -> u32 {
        core::mem::take(&mut self.unreported_ms)
    }

    pub fn count_down(&mut self, delta_ms: u32) {
        let delta = i32::try_from(delta_ms).unwrap_or(i32::MAX);
        self.countdown_ms = self.countdown_ms.saturating_sub(delta);
    }

    pub fn restart_countdown(&mut self, interval_ms: u32) {
        self.countdown_ms = i32::try_from(interval_ms).unwrap_or(i32::MAX);
    }
}
