//! Countdown driving one behavior's dispatch cadence.

use rand::{Rng, RngCore};

/// Millisecond countdown with reconfigurable bounds.
///
/// `update` floors at zero; `passed` stays true until the next reset, so a
/// behavior that could not act this tick fires again on its next chance
/// instead of losing the elapsed time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleTimer {
    remaining_ms: u32,
}

impl CycleTimer {
    pub fn new(ms: u32) -> Self {
        Self { remaining_ms: ms }
    }

    /// A timer that fires on the very next `update`, regardless of Δt.
    pub fn expired() -> Self {
        Self { remaining_ms: 0 }
    }

    pub fn update(&mut self, dt_ms: u32) {
        self.remaining_ms = self.remaining_ms.saturating_sub(dt_ms);
    }

    pub fn passed(&self) -> bool {
        self.remaining_ms == 0
    }

    pub fn reset(&mut self, ms: u32) {
        self.remaining_ms = ms;
    }

    /// Re-arms with a uniform draw from `[lo, hi]`. Degenerate bounds
    /// (`lo >= hi`) collapse to a fixed `lo` reset.
    pub fn reset_range(&mut self, rng: &mut dyn RngCore, lo: u32, hi: u32) {
        self.remaining_ms = if lo >= hi { lo } else { rng.gen_range(lo..=hi) };
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }
}
