use crate::action::{Action, ActionBase};
use crate::Result;
use crate::status::FrameState;

use super::check_duration;

const KIND: &str = "WaitForDuration";

/// Occupies time without mutating anything.
#[derive(Debug, Clone)]
pub struct WaitForDurationAction {
    base: ActionBase,
}

impl WaitForDurationAction {
    pub fn new(seconds: f32) -> Self {
        Self {
            base: ActionBase::new(seconds),
        }
    }

    /// Like [`WaitForDurationAction::new`], rejecting negative or non-finite durations.
    pub fn try_new(seconds: f32) -> Result<Self> {
        check_duration(seconds)?;
        Ok(Self::new(seconds))
    }

    fn tick(&mut self, dt: f32) -> FrameState {
        if self.base.should_skip(KIND) {
            return self.base.status();
        }
        self.base.begin(KIND);
        if self.base.advance(dt).finished {
            self.base.complete(KIND);
        }
        self.base.status()
    }
}

impl Action for WaitForDurationAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        KIND
    }

    fn next_frame(&mut self, dt: f32) -> FrameState {
        self.tick(dt)
    }

    // Waiting has no direction.
    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.tick(dt)
    }

    fn rewind(&mut self) {
        self.base.reset();
    }

    fn clone_action(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}
