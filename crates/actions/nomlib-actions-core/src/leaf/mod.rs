//! Leaf actions: each mutates one property of one target over its duration.

pub mod audio;
pub mod callback;
pub mod fade;
pub mod motion;
pub mod remove;
pub mod textures;
pub mod wait;

pub use audio::{FadeAudioGainBy, PlayAudioSource};
pub use callback::CallbackAction;
pub use fade::FadeAlphaAction;
pub use motion::{MoveAction, ScaleByAction};
pub use remove::RemoveAction;
pub use textures::AnimateTexturesAction;
pub use wait::WaitForDurationAction;

use crate::error::ActionError;
use crate::Result;

/// Reject durations a timed action cannot play.
pub(crate) fn check_duration(seconds: f32) -> Result<()> {
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(())
    } else {
        Err(ActionError::InvalidDuration { duration: seconds })
    }
}
