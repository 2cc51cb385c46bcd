//! Structural actions that own and drive child actions.
//!
//! Children are owned exclusively through `Box<dyn Action>`. Speed, timing curve,
//! pause, resume and release are forwarded to every child the combinator holds.

pub mod group;
pub mod repeat;
pub mod reversed;
pub mod sequence;

pub use group::GroupAction;
pub use repeat::{RepeatForAction, RepeatForeverAction};
pub use reversed::ReversedAction;
pub use sequence::SequenceAction;
