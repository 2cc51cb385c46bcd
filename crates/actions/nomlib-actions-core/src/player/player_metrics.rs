use serde::{Deserialize, Serialize};

/// Counters describing what an [`ActionPlayer`](crate::ActionPlayer) has done
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerMetrics {
    /// Number of `update` calls
    pub ticks: u64,
    /// Runs added, directly or through a spawner
    pub runs_started: u64,
    /// Runs that completed and were reaped
    pub runs_completed: u64,
    /// Runs stopped or replaced before completing
    pub runs_cancelled: u64,
    /// Runs currently held
    pub active_runs: usize,
    /// Delta used by the last update, after clamping
    pub last_delta: f32,
}

impl PlayerMetrics {
    /// Create new metrics
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset metrics
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
