use serde::{Deserialize, Serialize};

/// Global state of an [`ActionPlayer`](crate::ActionPlayer)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Running,
    /// `update` advances nothing until resumed
    Paused,
}

/// Lifecycle of one run inside the player
///
/// `Queued -> Running -> Completed`, with `Paused` reachable from either of the first two.
/// Completed runs are reaped in the same update that completes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Added but not yet stepped
    Queued,
    Running,
    Paused,
    Completed,
}

impl RunState {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Queued | Self::Running)
    }
}
