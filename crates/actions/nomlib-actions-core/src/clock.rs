//! Per-action elapsed-time accumulator.
//!
//! Actions never read a wall clock. The player hands each tick's delta down the tree and
//! every leaf accumulates it here, so a paused action simply stops accumulating.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing accumulated time against a duration.
pub const TIME_EPSILON: f32 = 1e-5;

/// Accumulating timer driven by caller-supplied deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionClock {
    elapsed: f32,
    started: bool,
    paused: bool,
}

impl ActionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start accumulating. A clock paused before it started stays paused.
    pub fn start(&mut self) {
        self.started = true;
    }

    /// Stop and zero the clock.
    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// Freeze accumulation. Idempotent.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue accumulating. Idempotent.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Add `dt` seconds unless the clock is stopped or paused.
    /// Negative and non-finite deltas count as zero. Returns the new elapsed time.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.is_running() && dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.elapsed
    }

    /// Pull elapsed time back to `limit` if it ran past it.
    pub fn clamp_to(&mut self, limit: f32) -> f32 {
        if self.elapsed > limit {
            self.elapsed = limit.max(0.0);
        }
        self.elapsed
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.started && !self.paused
    }
}

/// Whether `elapsed` has reached `limit` within [`TIME_EPSILON`].
#[inline]
pub fn reached(elapsed: f32, limit: f32) -> bool {
    elapsed + TIME_EPSILON >= limit
}
