//! The action capability surface and the bookkeeping every action shares.

use std::fmt;

use crate::clock::{reached, ActionClock};
use crate::status::{FrameState, PlayDirection};
use crate::timing::TimingCurve;

/// Progress of a timed action after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Elapsed time scaled by speed, within `[0, duration]`.
    pub frame_time: f32,
    /// `frame_time / duration`, within `[0, 1]`.
    pub fraction: f32,
    /// `fraction` after the timing curve.
    pub eased: f32,
    /// The action reached the end of its duration on this tick.
    pub finished: bool,
}

/// State shared by every action: identity, timing configuration and status.
///
/// `status` is only changed through [`ActionBase::complete`] and [`ActionBase::reset`],
/// which are crate-private; outside code can read it but never set it.
#[derive(Debug, Clone)]
pub struct ActionBase {
    name: Option<String>,
    duration: f32,
    speed: f32,
    curve: TimingCurve,
    curve_explicit: bool,
    status: FrameState,
    clock: ActionClock,
}

impl ActionBase {
    /// Bookkeeping for an action lasting `duration` seconds.
    /// Negative and NaN durations are treated as zero.
    pub fn new(duration: f32) -> Self {
        let duration = if duration >= 0.0 {
            duration
        } else {
            log::warn!("invalid duration {duration}, using 0");
            0.0
        };
        Self {
            name: None,
            duration,
            speed: 1.0,
            curve: TimingCurve::Linear,
            curve_explicit: false,
            status: FrameState::Playing,
            clock: ActionClock::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the speed modifier. Negative or non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f32) -> bool {
        if speed.is_finite() && speed >= 0.0 {
            self.speed = speed;
            true
        } else {
            log::warn!("{}: ignoring invalid speed {speed}", self.label());
            false
        }
    }

    #[inline]
    pub fn timing_curve(&self) -> TimingCurve {
        self.curve
    }

    #[inline]
    pub fn has_explicit_curve(&self) -> bool {
        self.curve_explicit
    }

    pub fn set_timing_curve(&mut self, curve: TimingCurve) {
        self.curve = curve;
        self.curve_explicit = true;
    }

    /// Adopt a curve pushed down by a parent. Returns false when an explicit curve wins.
    pub fn inherit_timing_curve(&mut self, curve: TimingCurve) -> bool {
        if self.curve_explicit {
            return false;
        }
        self.curve = curve;
        true
    }

    #[inline]
    pub fn status(&self) -> FrameState {
        self.status
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.clock.is_started()
    }

    /// Seconds accumulated since the first frame, before speed scaling.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    /// Name for log lines.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// True when this frame must not do any work: the action is paused or done.
    pub(crate) fn should_skip(&self, kind: &str) -> bool {
        if self.status.is_completed() {
            log::debug!("{kind} '{}': stepped after completion, ignoring", self.label());
            return true;
        }
        self.clock.is_paused()
    }

    /// Start the clock on the first frame. Returns true exactly once per play.
    pub(crate) fn begin(&mut self, kind: &str) -> bool {
        if self.clock.is_started() {
            return false;
        }
        self.clock.start();
        log::debug!(
            "{kind} '{}' BEGIN (duration {}, speed {})",
            self.label(),
            self.duration,
            self.speed
        );
        true
    }

    /// Accumulate `dt` and compute progress through the duration.
    ///
    /// Elapsed time is clamped to `duration / speed` so an oversized tick never
    /// overshoots; the frame time is that clamped value multiplied by speed.
    pub(crate) fn advance(&mut self, dt: f32) -> Progress {
        self.clock.advance(dt);
        let limit = if self.speed > 0.0 {
            self.duration / self.speed
        } else {
            f32::INFINITY
        };
        let elapsed = self.clock.clamp_to(limit);
        let finished = self.duration <= 0.0 || (self.speed > 0.0 && reached(elapsed, limit));
        let frame_time = if finished {
            self.duration
        } else {
            (elapsed * self.speed).min(self.duration)
        };
        let fraction = if finished || self.duration <= 0.0 {
            1.0
        } else {
            frame_time / self.duration
        };
        let eased = self.curve.apply(fraction);
        log::trace!(
            "'{}' frame_time {frame_time:.4} fraction {fraction:.4} eased {eased:.4}",
            self.label()
        );
        Progress {
            frame_time,
            fraction,
            eased,
            finished,
        }
    }

    pub(crate) fn complete(&mut self, kind: &str) {
        if !self.status.is_completed() {
            log::debug!("{kind} '{}' COMPLETED", self.label());
        }
        self.status = FrameState::Completed;
    }

    /// Back to the pre-play state: clock stopped and zeroed, status playing.
    pub(crate) fn reset(&mut self) {
        self.clock.stop();
        self.status = FrameState::Playing;
    }

    pub(crate) fn pause(&mut self) {
        self.clock.pause();
    }

    pub(crate) fn resume(&mut self) {
        self.clock.resume();
    }
}

impl Default for ActionBase {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// A unit of time-driven work that can be stepped forward or backward.
///
/// Actions are owned exclusively by their parent combinator or by the player. Trees are
/// duplicated with [`Action::clone_action`], never aliased.
pub trait Action: fmt::Debug {
    fn base(&self) -> &ActionBase;
    fn base_mut(&mut self) -> &mut ActionBase;

    /// Short type name used in log lines.
    fn kind(&self) -> &'static str;

    /// Advance by `dt` seconds of caller time.
    fn next_frame(&mut self, dt: f32) -> FrameState;

    /// Advance by `dt` seconds, playing the action backward.
    fn prev_frame(&mut self, dt: f32) -> FrameState;

    /// Return to the pre-play state so the action can run again.
    fn rewind(&mut self);

    /// Deep copy of this action, children included.
    fn clone_action(&self) -> Box<dyn Action>;

    /// Step in the given direction.
    fn step(&mut self, dt: f32, direction: PlayDirection) -> FrameState {
        match direction {
            PlayDirection::Forward => self.next_frame(dt),
            PlayDirection::Reverse => self.prev_frame(dt),
        }
    }

    /// Freeze progress without losing it. Idempotent.
    fn pause(&mut self) {
        self.base_mut().pause();
    }

    /// Continue after [`Action::pause`]. Idempotent.
    fn resume(&mut self) {
        self.base_mut().resume();
    }

    /// Drop references to external resources. Safe to call repeatedly.
    fn release(&mut self) {}

    fn name(&self) -> Option<&str> {
        self.base().name()
    }

    fn set_name(&mut self, name: String) {
        self.base_mut().set_name(name);
    }

    fn duration(&self) -> f32 {
        self.base().duration()
    }

    fn speed(&self) -> f32 {
        self.base().speed()
    }

    fn set_speed(&mut self, speed: f32) {
        self.base_mut().set_speed(speed);
    }

    fn timing_curve(&self) -> TimingCurve {
        self.base().timing_curve()
    }

    /// Explicitly set the curve. Combinators also push it to their children.
    fn set_timing_curve(&mut self, curve: TimingCurve) {
        self.base_mut().set_timing_curve(curve);
    }

    /// Adopt a curve from a parent unless one was set explicitly.
    fn inherit_timing_curve(&mut self, curve: TimingCurve) {
        self.base_mut().inherit_timing_curve(curve);
    }

    fn status(&self) -> FrameState {
        self.base().status()
    }

    fn is_completed(&self) -> bool {
        self.base().is_completed()
    }

    fn is_paused(&self) -> bool {
        self.base().is_paused()
    }
}

impl Clone for Box<dyn Action> {
    fn clone(&self) -> Self {
        self.clone_action()
    }
}

/// Builder-style helpers for any concrete action.
pub trait ActionExt: Action + Sized + 'static {
    fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name.into());
        self
    }

    fn with_speed(mut self, speed: f32) -> Self {
        self.set_speed(speed);
        self
    }

    fn with_timing_curve(mut self, curve: TimingCurve) -> Self {
        self.set_timing_curve(curve);
        self
    }

    fn boxed(self) -> Box<dyn Action> {
        Box::new(self)
    }
}

impl<A: Action + Sized + 'static> ActionExt for A {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_clamps_to_duration_over_speed() {
        let mut base = ActionBase::new(1.0);
        base.set_speed(2.0);
        base.begin("test");
        let p = base.advance(0.2);
        assert!((p.frame_time - 0.4).abs() < 1e-6);
        assert!(!p.finished);
        let p = base.advance(5.0);
        assert!(p.finished);
        assert_eq!(p.fraction, 1.0);
        assert!((base.elapsed() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut base = ActionBase::new(0.0);
        base.begin("test");
        let p = base.advance(0.0);
        assert!(p.finished);
        assert_eq!(p.eased, 1.0);
    }

    #[test]
    fn zero_speed_never_finishes() {
        let mut base = ActionBase::new(1.0);
        base.set_speed(0.0);
        base.begin("test");
        let p = base.advance(100.0);
        assert!(!p.finished);
        assert_eq!(p.frame_time, 0.0);
    }

    #[test]
    fn invalid_inputs_are_sanitized() {
        assert_eq!(ActionBase::new(-2.0).duration(), 0.0);
        assert_eq!(ActionBase::new(f32::NAN).duration(), 0.0);
        let mut base = ActionBase::new(1.0);
        assert!(!base.set_speed(-1.0));
        assert!(!base.set_speed(f32::NAN));
        assert_eq!(base.speed(), 1.0);
    }

    #[test]
    fn explicit_curve_wins_over_inherited() {
        let mut base = ActionBase::new(1.0);
        assert!(base.inherit_timing_curve(TimingCurve::QuadIn));
        assert_eq!(base.timing_curve(), TimingCurve::QuadIn);
        base.set_timing_curve(TimingCurve::SineOut);
        assert!(!base.inherit_timing_curve(TimingCurve::CubicIn));
        assert_eq!(base.timing_curve(), TimingCurve::SineOut);
    }

    #[test]
    fn reset_returns_to_playing() {
        let mut base = ActionBase::new(0.5);
        base.begin("test");
        base.advance(1.0);
        base.complete("test");
        assert!(base.is_completed());
        base.reset();
        assert_eq!(base.status(), FrameState::Playing);
        assert_eq!(base.elapsed(), 0.0);
        assert!(!base.is_started());
    }
}
