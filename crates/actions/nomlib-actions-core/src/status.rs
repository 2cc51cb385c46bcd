use serde::{Deserialize, Serialize};

/// Result of advancing an action by one tick.
///
/// This is the contract between a child action and its parent combinator or the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameState {
    /// Still in progress; keep stepping.
    Playing,
    /// Finished in the direction it was being played.
    Completed,
}

impl FrameState {
    /// Get the name of this frame state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Completed => "completed",
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Which way an action is being stepped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayDirection {
    Forward,
    Reverse,
}

impl PlayDirection {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Sign applied to a relative displacement.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }
}
