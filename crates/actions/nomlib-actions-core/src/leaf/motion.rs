//! Position and scale interpolation.

use std::rc::Rc;

use crate::action::{Action, ActionBase};
use crate::Result;
use crate::status::{FrameState, PlayDirection};
use crate::targets::{with_target, SharedDrawable, TargetAccess, Vec2, WeakDrawable};

use super::check_duration;

const MOVE: &str = "Move";
const SCALE: &str = "ScaleBy";

#[derive(Debug, Clone, Copy, PartialEq)]
enum MoveMode {
    By(Vec2),
    To(Vec2),
}

/// Moves a drawable from the position it had on the first frame.
///
/// `move_by` travels a fixed displacement; `move_to` travels to an absolute point.
/// Reverse playback travels the negated displacement.
#[derive(Debug, Clone)]
pub struct MoveAction {
    base: ActionBase,
    target: Option<WeakDrawable>,
    mode: MoveMode,
    initial: Option<Vec2>,
    delta: Vec2,
}

impl MoveAction {
    fn with_mode(target: &SharedDrawable, mode: MoveMode, seconds: f32) -> Self {
        Self {
            base: ActionBase::new(seconds),
            target: Some(Rc::downgrade(target)),
            mode,
            initial: None,
            delta: Vec2::ZERO,
        }
    }

    pub fn move_by(target: &SharedDrawable, delta: impl Into<Vec2>, seconds: f32) -> Self {
        Self::with_mode(target, MoveMode::By(delta.into()), seconds)
    }

    pub fn move_to(target: &SharedDrawable, position: impl Into<Vec2>, seconds: f32) -> Self {
        Self::with_mode(target, MoveMode::To(position.into()), seconds)
    }

    pub fn try_move_by(target: &SharedDrawable, delta: impl Into<Vec2>, seconds: f32) -> Result<Self> {
        check_duration(seconds)?;
        Ok(Self::move_by(target, delta, seconds))
    }

    fn tick(&mut self, dt: f32, direction: PlayDirection) -> FrameState {
        if self.base.should_skip(MOVE) {
            return self.base.status();
        }

        if self.initial.is_none() {
            let mut captured = None;
            match with_target(&self.target, MOVE, |d| captured = Some(d.position())) {
                TargetAccess::Gone => {
                    self.base.complete(MOVE);
                    return self.base.status();
                }
                TargetAccess::Busy => return self.base.status(),
                TargetAccess::Applied => {}
            }
            let initial = captured.unwrap_or_default();
            self.initial = Some(initial);
            self.delta = match self.mode {
                MoveMode::By(delta) => delta,
                MoveMode::To(position) => position - initial,
            };
        }
        self.base.begin(MOVE);

        let progress = self.base.advance(dt);
        let initial = self.initial.unwrap_or_default();
        let position = initial + self.delta * (direction.sign() * progress.eased);
        log::trace!("{MOVE} '{}' position {position:?}", self.base.label());

        match with_target(&self.target, MOVE, |d| d.set_position(position)) {
            TargetAccess::Gone => self.base.complete(MOVE),
            TargetAccess::Applied if progress.finished => self.base.complete(MOVE),
            _ => {}
        }
        self.base.status()
    }
}

impl Action for MoveAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        MOVE
    }

    fn next_frame(&mut self, dt: f32) -> FrameState {
        self.tick(dt, PlayDirection::Forward)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.tick(dt, PlayDirection::Reverse)
    }

    fn rewind(&mut self) {
        if let Some(initial) = self.initial.take() {
            with_target(&self.target, MOVE, |d| d.set_position(initial));
        }
        self.delta = Vec2::ZERO;
        self.base.reset();
    }

    fn release(&mut self) {
        self.target = None;
    }

    fn clone_action(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Scales a drawable by a factor relative to its scale on the first frame.
///
/// Forward playback ends at `initial * factor`; reverse ends at `initial / factor`.
/// A zero factor component cannot be divided out, so reverse leaves that axis alone.
#[derive(Debug, Clone)]
pub struct ScaleByAction {
    base: ActionBase,
    target: Option<WeakDrawable>,
    factor: Vec2,
    initial: Option<Vec2>,
}

impl ScaleByAction {
    pub fn new(target: &SharedDrawable, factor: impl Into<Vec2>, seconds: f32) -> Self {
        Self {
            base: ActionBase::new(seconds),
            target: Some(Rc::downgrade(target)),
            factor: factor.into(),
            initial: None,
        }
    }

    pub fn try_new(target: &SharedDrawable, factor: impl Into<Vec2>, seconds: f32) -> Result<Self> {
        check_duration(seconds)?;
        Ok(Self::new(target, factor, seconds))
    }

    fn end_scale(&self, initial: Vec2, direction: PlayDirection) -> Vec2 {
        match direction {
            PlayDirection::Forward => initial.scale_by(self.factor),
            PlayDirection::Reverse => {
                let divide = |value: f32, factor: f32| {
                    if factor == 0.0 {
                        value
                    } else {
                        value / factor
                    }
                };
                Vec2::new(divide(initial.x, self.factor.x), divide(initial.y, self.factor.y))
            }
        }
    }

    fn tick(&mut self, dt: f32, direction: PlayDirection) -> FrameState {
        if self.base.should_skip(SCALE) {
            return self.base.status();
        }

        if self.initial.is_none() {
            let mut captured = None;
            match with_target(&self.target, SCALE, |d| captured = Some(d.scale())) {
                TargetAccess::Gone => {
                    self.base.complete(SCALE);
                    return self.base.status();
                }
                TargetAccess::Busy => return self.base.status(),
                TargetAccess::Applied => {}
            }
            self.initial = captured;
        }
        self.base.begin(SCALE);

        let progress = self.base.advance(dt);
        let initial = self.initial.unwrap_or(Vec2::ONE);
        let scale = initial.lerp(self.end_scale(initial, direction), progress.eased);
        log::trace!("{SCALE} '{}' scale {scale:?}", self.base.label());

        match with_target(&self.target, SCALE, |d| d.set_scale(scale)) {
            TargetAccess::Gone => self.base.complete(SCALE),
            TargetAccess::Applied if progress.finished => self.base.complete(SCALE),
            _ => {}
        }
        self.base.status()
    }
}

impl Action for ScaleByAction {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        SCALE
    }

    fn next_frame(&mut self, dt: f32) -> FrameState {
        self.tick(dt, PlayDirection::Forward)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.tick(dt, PlayDirection::Reverse)
    }

    fn rewind(&mut self) {
        if let Some(initial) = self.initial.take() {
            with_target(&self.target, SCALE, |d| d.set_scale(initial));
        }
        self.base.reset();
    }

    fn release(&mut self) {
        self.target = None;
    }

    fn clone_action(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}
