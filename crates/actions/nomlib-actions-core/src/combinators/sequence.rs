use crate::action::{Action, ActionBase};
use crate::status::{FrameState, PlayDirection};
use crate::timing::TimingCurve;

const KIND: &str = "Sequence";

/// Runs children one after another.
///
/// Forward playback walks the list front to back and reverse playback walks it back to
/// front; each direction keeps its own position. Zero-length children (callbacks,
/// removes) hand the whole tick on to the next child, so they never cost a frame. After a
/// timed child finishes, the next child is only primed with a zero delta: time left over
/// from a timed child is never carried over.
#[derive(Debug, Clone)]
pub struct SequenceAction {
    base: ActionBase,
    children: Vec<Box<dyn Action>>,
    forward: usize,
    reverse: usize,
}

impl SequenceAction {
    pub fn new(children: Vec<Box<dyn Action>>) -> Self {
        let duration = children.iter().map(|c| c.duration()).sum();
        Self {
            base: ActionBase::new(duration),
            children,
            forward: 0,
            reverse: 0,
        }
    }

    pub fn children(&self) -> &[Box<dyn Action>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn Action>] {
        &mut self.children
    }

    /// Number of children finished in the given direction.
    pub fn completed(&self, direction: PlayDirection) -> usize {
        match direction {
            PlayDirection::Forward => self.forward,
            PlayDirection::Reverse => self.reverse,
        }
    }

    fn tick(&mut self, dt: f32, direction: PlayDirection) -> FrameState {
        if self.base.should_skip(KIND) {
            return self.base.status();
        }
        let total = self.children.len();
        if total == 0 {
            log::warn!("{KIND} '{}': no children, completing", self.base.label());
            self.base.complete(KIND);
            return self.base.status();
        }
        self.base.begin(KIND);

        let mut delta = dt;
        loop {
            let done = self.completed(direction);
            if done >= total {
                self.base.complete(KIND);
                break;
            }
            let index = match direction {
                PlayDirection::Forward => done,
                PlayDirection::Reverse => total - 1 - done,
            };
            let child = &mut self.children[index];
            if child.step(delta, direction).is_playing() {
                break;
            }
            log::debug!(
                "{KIND} '{}': {} '{}' finished [{}/{total}]",
                self.base.label(),
                child.kind(),
                child.name().unwrap_or("<unnamed>"),
                done + 1
            );
            if child.duration() > 0.0 {
                delta = 0.0;
            }
            match direction {
                PlayDirection::Forward => self.forward += 1,
                PlayDirection::Reverse => self.reverse += 1,
            }
        }
        self.base.status()
    }
}

impl Action for SequenceAction {
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

    // Last to first, so the earliest child's captured state is the one left behind.
    fn rewind(&mut self) {
        for child in self.children.iter_mut().rev() {
            child.rewind();
        }
        self.forward = 0;
        self.reverse = 0;
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
        self.children.iter().map(|c| c.duration()).sum()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionExt;
    use crate::leaf::WaitForDurationAction;

    fn wait(seconds: f32) -> Box<dyn Action> {
        WaitForDurationAction::new(seconds).boxed()
    }

    #[test]
    fn runs_children_in_order() {
        let mut seq = SequenceAction::new(vec![wait(1.0), wait(1.0)]);
        assert_eq!(seq.next_frame(1.0), FrameState::Playing);
        assert!(seq.children()[0].is_completed());
        assert!(!seq.children()[1].is_completed());
        assert_eq!(seq.next_frame(1.0), FrameState::Completed);
    }

    #[test]
    fn reverse_walks_from_the_back() {
        let mut seq = SequenceAction::new(vec![wait(1.0), wait(2.0)]);
        seq.prev_frame(2.0);
        assert!(seq.children()[1].is_completed());
        assert!(!seq.children()[0].is_completed());
        assert_eq!(seq.completed(PlayDirection::Reverse), 1);
        assert_eq!(seq.completed(PlayDirection::Forward), 0);
    }

    #[test]
    fn zero_length_children_finish_in_one_tick() {
        let mut seq = SequenceAction::new(vec![wait(0.5), wait(0.0), wait(0.0)]);
        assert_eq!(seq.next_frame(0.5), FrameState::Completed);
    }

    #[test]
    fn zero_length_children_pass_the_tick_on() {
        let mut seq = SequenceAction::new(vec![wait(0.0), wait(0.5), wait(0.0), wait(0.5)]);
        assert_eq!(seq.next_frame(0.25), FrameState::Playing);
        assert_eq!(seq.children()[1].base().elapsed(), 0.25);
        assert_eq!(seq.next_frame(0.25), FrameState::Playing);
        assert_eq!(seq.completed(PlayDirection::Forward), 3);
        assert_eq!(seq.children()[3].base().elapsed(), 0.0);
        assert_eq!(seq.next_frame(0.5), FrameState::Completed);
    }

    #[test]
    fn empty_sequence_completes() {
        let mut seq = SequenceAction::new(Vec::new());
        assert!(seq.next_frame(0.0).is_completed());
    }

    #[test]
    fn duration_is_sum() {
        let seq = SequenceAction::new(vec![wait(1.0), wait(0.5)]);
        assert!((seq.duration() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn speed_and_curve_propagate() {
        let explicit = WaitForDurationAction::new(1.0)
            .with_timing_curve(TimingCurve::SineIn)
            .boxed();
        let mut seq = SequenceAction::new(vec![wait(1.0), explicit]);
        seq.set_speed(2.0);
        seq.set_timing_curve(TimingCurve::QuadOut);
        assert_eq!(seq.children()[0].speed(), 2.0);
        assert_eq!(seq.children()[0].timing_curve(), TimingCurve::QuadOut);
        assert_eq!(seq.children()[1].timing_curve(), TimingCurve::SineIn);
    }
}
