use crate::action::{Action, ActionBase};
use crate::status::{FrameState, PlayDirection};
use crate::timing::TimingCurve;

const KIND: &str = "Group";

/// Runs all children concurrently from the same tick.
///
/// Completion is tracked per child: a child that finishes early is no longer stepped,
/// and the group completes once every child has.
#[derive(Debug, Clone)]
pub struct GroupAction {
    base: ActionBase,
    children: Vec<Box<dyn Action>>,
}

impl GroupAction {
    pub fn new(children: Vec<Box<dyn Action>>) -> Self {
        let duration = children.iter().map(|c| c.duration()).fold(0.0, f32::max);
        Self {
            base: ActionBase::new(duration),
            children,
        }
    }

    pub fn children(&self) -> &[Box<dyn Action>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn Action>] {
        &mut self.children
    }

    /// Number of children that have completed.
    pub fn completed(&self) -> usize {
        self.children.iter().filter(|c| c.is_completed()).count()
    }

    fn tick(&mut self, dt: f32, direction: PlayDirection) -> FrameState {
        if self.base.should_skip(KIND) {
            return self.base.status();
        }
        if self.children.is_empty() {
            log::warn!("{KIND} '{}': no children, completing", self.base.label());
            self.base.complete(KIND);
            return self.base.status();
        }
        self.base.begin(KIND);

        let total = self.children.len();
        let mut done = self.completed();
        for child in self.children.iter_mut().filter(|c| !c.is_completed()) {
            if child.step(dt, direction).is_completed() {
                done += 1;
                log::debug!(
                    "{KIND} '{}': {} '{}' finished [{done}/{total}]",
                    self.base.label(),
                    child.kind(),
                    child.name().unwrap_or("<unnamed>"),
                );
            }
        }
        if done == total {
            self.base.complete(KIND);
        }
        self.base.status()
    }
}

impl Action for GroupAction {
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
        self.tick(dt, PlayDirection::Forward)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.tick(dt, PlayDirection::Reverse)
    }

    fn pause(&mut self) {
        self.base.pause();
        for child in &mut self.children {
            child.pause();
        }
    }

    fn resume(&mut self) {
        self.base.resume();
        for child in &mut self.children {
            child.resume();
        }
    }

    fn rewind(&mut self) {
        for child in &mut self.children {
            child.rewind();
        }
        self.base.reset();
    }

    fn release(&mut self) {
        for child in &mut self.children {
            child.release();
        }
    }

    fn clone_action(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }

    fn duration(&self) -> f32 {
        self.children.iter().map(|c| c.duration()).fold(0.0, f32::max)
    }

    fn set_speed(&mut self, speed: f32) {
        if self.base.set_speed(speed) {
            for child in &mut self.children {
                child.set_speed(speed);
            }
        }
    }

    fn set_timing_curve(&mut self, curve: TimingCurve) {
        self.base.set_timing_curve(curve);
        for child in &mut self.children {
            child.inherit_timing_curve(curve);
        }
    }

    fn inherit_timing_curve(&mut self, curve: TimingCurve) {
        if self.base.inherit_timing_curve(curve) {
            for child in &mut self.children {
                child.inherit_timing_curve(curve);
            }
        }
    }
}
