//! Repetition of a single proxied child.
//!
//! A missing child is not an error: the repeat completes on its first tick and logs it.

use crate::action::{Action, ActionBase};
use crate::status::{FrameState, PlayDirection};
use crate::timing::TimingCurve;

const REPEAT_FOR: &str = "RepeatFor";
const REPEAT_FOREVER: &str = "RepeatForever";

/// Plays a child `times` times, rewinding it after each completion.
#[derive(Debug, Clone)]
pub struct RepeatForAction {
    base: ActionBase,
    child: Option<Box<dyn Action>>,
    times: u32,
    repeats: u32,
}

impl RepeatForAction {
    pub fn new(child: Box<dyn Action>, times: u32) -> Self {
        Self::from_optional(Some(child), times)
    }

    /// A repeat whose child may be missing.
    pub fn from_optional(child: Option<Box<dyn Action>>, times: u32) -> Self {
        let duration = child.as_ref().map_or(0.0, |c| c.duration()) * times as f32;
        Self {
            base: ActionBase::new(duration),
            child,
            times,
            repeats: 0,
        }
    }

    pub fn child(&self) -> Option<&dyn Action> {
        self.child.as_deref()
    }

    pub fn times(&self) -> u32 {
        self.times
    }

    /// Completed iterations so far.
    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    fn tick(&mut self, dt: f32, direction: PlayDirection) -> FrameState {
        if self.base.should_skip(REPEAT_FOR) {
            return self.base.status();
        }
        let Some(child) = self.child.as_mut() else {
            log::warn!("{REPEAT_FOR} '{}': no child to repeat", self.base.label());
            self.base.complete(REPEAT_FOR);
            return self.base.status();
        };
        if self.repeats >= self.times {
            self.base.complete(REPEAT_FOR);
            return self.base.status();
        }
        self.base.begin(REPEAT_FOR);

        if child.step(dt, direction).is_completed() {
            self.repeats += 1;
            log::debug!(
                "{REPEAT_FOR} '{}': [{}/{}]",
                self.base.label(),
                self.repeats,
                self.times
            );
            if self.repeats < self.times {
                child.rewind();
            } else {
                self.base.complete(REPEAT_FOR);
            }
        }
        self.base.status()
    }
}

/// Plays a child over and over. Never completes on its own.
#[derive(Debug, Clone)]
pub struct RepeatForeverAction {
    base: ActionBase,
    child: Option<Box<dyn Action>>,
    repeats: u64,
}

impl RepeatForeverAction {
    pub fn new(child: Box<dyn Action>) -> Self {
        Self::from_optional(Some(child))
    }

    /// A repeat whose child may be missing.
    pub fn from_optional(child: Option<Box<dyn Action>>) -> Self {
        Self {
            base: ActionBase::new(f32::INFINITY),
            child,
            repeats: 0,
        }
    }

    pub fn child(&self) -> Option<&dyn Action> {
        self.child.as_deref()
    }

    pub fn repeats(&self) -> u64 {
        self.repeats
    }

    fn tick(&mut self, dt: f32, direction: PlayDirection) -> FrameState {
        if self.base.should_skip(REPEAT_FOREVER) {
            return self.base.status();
        }
        let Some(child) = self.child.as_mut() else {
            log::warn!("{REPEAT_FOREVER} '{}': no child to repeat", self.base.label());
            self.base.complete(REPEAT_FOREVER);
            return self.base.status();
        };
        self.base.begin(REPEAT_FOREVER);

        if child.step(dt, direction).is_completed() {
            self.repeats += 1;
            log::debug!("{REPEAT_FOREVER} '{}': [{}]", self.base.label(), self.repeats);
            child.rewind();
        }
        self.base.status()
    }
}

macro_rules! proxy_common {
    ($ty:ty, $kind:expr) => {
        impl Action for $ty {
            fn base(&self) -> &ActionBase {
                &self.base
            }

            fn base_mut(&mut self) -> &mut ActionBase {
                &mut self.base
            }

            fn kind(&self) -> &'static str {
                $kind
            }

            fn next_frame(&mut self, dt: f32) -> FrameState {
                self.tick(dt, PlayDirection::Forward)
            }

            fn prev_frame(&mut self, dt: f32) -> FrameState {
                self.tick(dt, PlayDirection::Reverse)
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
                self.repeats = 0;
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
    };
}

proxy_common!(RepeatForAction, REPEAT_FOR);
proxy_common!(RepeatForeverAction, REPEAT_FOREVER);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionExt;
    use crate::leaf::WaitForDurationAction;

    fn wait(seconds: f32) -> Box<dyn Action> {
        WaitForDurationAction::new(seconds).boxed()
    }

    #[test]
    fn repeat_for_counts_iterations() {
        let mut repeat = RepeatForAction::new(wait(0.5), 3);
        assert!((repeat.duration() - 1.5).abs() < 1e-6);
        assert_eq!(repeat.next_frame(0.5), FrameState::Playing);
        assert_eq!(repeat.next_frame(0.5), FrameState::Playing);
        assert_eq!(repeat.repeats(), 2);
        assert_eq!(repeat.next_frame(0.5), FrameState::Completed);
        assert_eq!(repeat.repeats(), 3);
    }

    #[test]
    fn repeat_zero_times_completes() {
        assert!(RepeatForAction::new(wait(1.0), 0).next_frame(0.0).is_completed());
    }

    #[test]
    fn missing_child_completes() {
        assert!(RepeatForAction::from_optional(None, 4).next_frame(0.1).is_completed());
        assert!(RepeatForeverAction::from_optional(None).next_frame(0.1).is_completed());
    }

    #[test]
    fn forever_keeps_playing() {
        let mut forever = RepeatForeverAction::new(wait(0.25));
        for _ in 0..100 {
            assert_eq!(forever.next_frame(0.25), FrameState::Playing);
        }
        assert_eq!(forever.repeats(), 100);
        assert!(forever.duration().is_infinite());
    }

    #[test]
    fn rewind_resets_counter() {
        let mut repeat = RepeatForAction::new(wait(0.5), 2);
        repeat.next_frame(0.5);
        repeat.next_frame(0.5);
        assert!(repeat.is_completed());
        repeat.rewind();
        assert_eq!(repeat.repeats(), 0);
        assert_eq!(repeat.next_frame(0.5), FrameState::Playing);
    }
}
