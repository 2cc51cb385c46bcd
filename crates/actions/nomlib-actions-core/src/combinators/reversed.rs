use crate::action::{Action, ActionBase};
use crate::status::{FrameState, PlayDirection};
use crate::timing::TimingCurve;

const KIND: &str = "Reversed";

/// Plays a child backward by swapping its `next_frame` and `prev_frame`.
#[derive(Debug, Clone)]
pub struct ReversedAction {
    base: ActionBase,
    child: Option<Box<dyn Action>>,
}

impl ReversedAction {
    pub fn new(child: Box<dyn Action>) -> Self {
        Self::from_optional(Some(child))
    }

    pub fn from_optional(child: Option<Box<dyn Action>>) -> Self {
        let duration = child.as_ref().map_or(0.0, |c| c.duration());
        Self {
            base: ActionBase::new(duration),
            child,
        }
    }

    pub fn child(&self) -> Option<&dyn Action> {
        self.child.as_deref()
    }

    fn drive(&mut self, dt: f32, direction: PlayDirection) -> FrameState {
        if self.base.should_skip(KIND) {
            return self.base.status();
        }
        let Some(child) = self.child.as_mut() else {
            log::warn!("{KIND} '{}': no child to reverse", self.base.label());
            self.base.complete(KIND);
            return self.base.status();
        };
        self.base.begin(KIND);
        if child.step(dt, direction.flipped()).is_completed() {
            self.base.complete(KIND);
        }
        self.base.status()
    }
}

impl Action for ReversedAction {
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
        self.drive(dt, PlayDirection::Forward)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.drive(dt, PlayDirection::Reverse)
    }

    fn pause(&mut self) {
        self.base.pause();
        if let Some(child) = self.child.as_mut() {
            child.pause();
        }
    }

    fn resume(&mut self) {
        self.base.resume();
        if let Some(child) = self.child.as_mut() {
            child.resume();
        }
    }

    fn rewind(&mut self) {
        if let Some(child) = self.child.as_mut() {
            child.rewind();
        }
        self.base.reset();
    }

    fn release(&mut self) {
        if let Some(child) = self.child.as_mut() {
            child.release();
        }
    }

    fn clone_action(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }

    fn duration(&self) -> f32 {
        self.child.as_ref().map_or(0.0, |c| c.duration())
    }

    fn set_speed(&mut self, speed: f32) {
        if self.base.set_speed(speed) {
            if let Some(child) = self.child.as_mut() {
                child.set_speed(speed);
            }
        }
    }

    fn set_timing_curve(&mut self, curve: TimingCurve) {
        self.base.set_timing_curve(curve);
        if let Some(child) = self.child.as_mut() {
            child.inherit_timing_curve(curve);
        }
    }

    fn inherit_timing_curve(&mut self, curve: TimingCurve) {
        if self.base.inherit_timing_curve(curve) {
            if let Some(child) = self.child.as_mut() {
                child.inherit_timing_curve(curve);
            }
        }
    }
}
