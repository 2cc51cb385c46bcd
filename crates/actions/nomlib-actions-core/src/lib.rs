//! nomlib action scheduler
//!
//! A cooperative, frame-stepped scheduler for time-driven mutation of external targets.
//! Actions are composed into trees (sequences, groups, repeats, reversals) and handed to
//! an [`ActionPlayer`], which the host ticks once per frame with the elapsed delta.
//!
//! Nothing here blocks, spawns threads or reads a wall clock. Soft failures such as a
//! dropped target or a missing child are logged through the `log` facade and resolved as
//! completion; only construction and configuration report [`ActionError`]s.

pub mod action;
pub mod clock;
pub mod combinators;
pub mod config;
pub mod error;
pub mod ids;
pub mod leaf;
pub mod player;
pub mod status;
pub mod targets;
pub mod timing;

// Re-export common types for convenience
pub use action::{Action, ActionBase, ActionExt, Progress};
pub use clock::{ActionClock, TIME_EPSILON};
pub use combinators::{
    GroupAction, RepeatForAction, RepeatForeverAction, ReversedAction, SequenceAction,
};
pub use config::{NamePolicy, PlayerConfig};
pub use error::ActionError;
pub use ids::{IdAllocator, RunId};
pub use leaf::callback::ActionCallback;
pub use leaf::{
    AnimateTexturesAction, CallbackAction, FadeAlphaAction, FadeAudioGainBy, MoveAction,
    PlayAudioSource, RemoveAction, ScaleByAction, WaitForDurationAction,
};
pub use player::{
    ActionPlayer, ActionSpawner, CompletionCallback, PlayerMetrics, PlayerState, RunOptions,
    RunState,
};
pub use status::{FrameState, PlayDirection};
pub use targets::{
    AudioSource, Drawable, SharedAudio, SharedDrawable, Vec2, MAX_GAIN, MIN_GAIN,
};
pub use timing::TimingCurve;

/// Action scheduler result type
pub type Result<T> = core::result::Result<T, ActionError>;
