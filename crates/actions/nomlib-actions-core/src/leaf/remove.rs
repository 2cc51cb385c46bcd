use std::rc::Rc;

use crate::action::{Action, ActionBase};
use crate::status::FrameState;
use crate::targets::{with_target, SharedDrawable, TargetAccess, WeakDrawable};

const KIND: &str = "Remove";

/// Detaches a drawable from its renderer and drops its texture, then completes.
#[derive(Debug, Clone)]
pub struct RemoveAction {
    base: ActionBase,
    target: Option<WeakDrawable>,
}

impl RemoveAction {
    pub fn new(target: &SharedDrawable) -> Self {
        Self {
            base: ActionBase::new(0.0),
            target: Some(Rc::downgrade(target)),
        }
    }

    fn tick(&mut self) -> FrameState {
        if self.base.should_skip(KIND) {
            return self.base.status();
        }
        self.base.begin(KIND);
        let access = with_target(&self.target, KIND, |d| {
            d.detach();
            d.release_texture();
        });
        if access == TargetAccess::Busy {
            return self.base.status();
        }
        self.target = None;
        self.base.complete(KIND);
        self.base.status()
    }
}

impl Action for RemoveAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        KIND
    }

    fn next_frame(&mut self, _dt: f32) -> FrameState {
        self.tick()
    }

    fn prev_frame(&mut self, _dt: f32) -> FrameState {
        self.tick()
    }

    // The reference is gone after the first play; a replay completes without effect.
    fn rewind(&mut self) {
        self.base.reset();
    }

    fn release(&mut self) {
        self.target = None;
    }

    fn clone_action(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}
