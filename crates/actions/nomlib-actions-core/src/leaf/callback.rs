use std::fmt;
use std::rc::Rc;

use crate::action::{Action, ActionBase};
use crate::status::FrameState;

const KIND: &str = "Callback";

/// Shared zero-argument delegate.
pub type ActionCallback = Rc<dyn Fn()>;

/// Invokes a delegate once per play and completes in the same tick.
///
/// Rewinding re-arms the delegate, so a repeated callback fires once per iteration.
/// Clones share the delegate.
#[derive(Clone)]
pub struct CallbackAction {
    base: ActionBase,
    func: Option<ActionCallback>,
    fired: bool,
}

impl CallbackAction {
    pub fn new(func: impl Fn() + 'static) -> Self {
        Self::from_rc(Rc::new(func))
    }

    pub fn from_rc(func: ActionCallback) -> Self {
        Self {
            base: ActionBase::new(0.0),
            func: Some(func),
            fired: false,
        }
    }

    fn tick(&mut self) -> FrameState {
        if self.base.should_skip(KIND) {
            return self.base.status();
        }
        self.base.begin(KIND);
        if !self.fired {
            self.fired = true;
            match &self.func {
                Some(func) => func(),
                None => log::warn!("{KIND} '{}': no delegate to invoke", self.base.label()),
            }
        }
        self.base.complete(KIND);
        self.base.status()
    }
}

impl fmt::Debug for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackAction")
            .field("base", &self.base)
            .field("armed", &self.func.is_some())
            .field("fired", &self.fired)
            .finish()
    }
}

impl Action for CallbackAction {
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

    fn rewind(&mut self) {
        self.fired = false;
        self.base.reset();
    }

    fn release(&mut self) {
        self.func = None;
    }

    fn clone_action(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn fires_once_and_completes() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut action = CallbackAction::new(move || counter.set(counter.get() + 1));

        assert_eq!(action.next_frame(0.0), FrameState::Completed);
        action.next_frame(0.0);
        assert_eq!(hits.get(), 1);

        action.rewind();
        action.prev_frame(1.0);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn released_callback_completes_silently() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut action = CallbackAction::new(move || counter.set(counter.get() + 1));
        action.release();
        action.release();
        assert!(action.next_frame(0.0).is_completed());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn paused_callback_waits() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut action = CallbackAction::new(move || counter.set(counter.get() + 1));
        action.pause();
        assert_eq!(action.next_frame(0.0), FrameState::Playing);
        assert_eq!(hits.get(), 0);
        action.resume();
        assert!(action.next_frame(0.0).is_completed());
        assert_eq!(hits.get(), 1);
    }
}
