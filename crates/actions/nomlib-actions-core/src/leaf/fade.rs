use crate::action::{Action, ActionBase};
use crate::Result;
use crate::status::{FrameState, PlayDirection};
use crate::targets::{with_target, SharedDrawable, TargetAccess, WeakDrawable};

use super::check_duration;

const KIND: &str = "FadeAlpha";

/// Interpolates a drawable's alpha channel by a fixed displacement.
///
/// The starting alpha is captured on the first frame. Fading in displaces by `+255` and
/// fading out by `-255`, so a sprite that is already opaque still fades out fully when a
/// fade-in is played backward. Playing backward applies the negated displacement, and
/// the result is always clamped to `0..=255`.
#[derive(Debug, Clone)]
pub struct FadeAlphaAction {
    base: ActionBase,
    target: Option<WeakDrawable>,
    displacement: i16,
    initial: Option<u8>,
}

impl FadeAlphaAction {
    /// Fade by a relative amount.
    pub fn fade_alpha_by(target: &SharedDrawable, delta: i16, seconds: f32) -> Self {
        Self {
            base: ActionBase::new(seconds),
            target: Some(std::rc::Rc::downgrade(target)),
            displacement: delta,
            initial: None,
        }
    }

    /// Fade towards fully opaque.
    pub fn fade_in(target: &SharedDrawable, seconds: f32) -> Self {
        Self::fade_alpha_by(target, i16::from(u8::MAX), seconds)
    }

    /// Fade towards fully transparent.
    pub fn fade_out(target: &SharedDrawable, seconds: f32) -> Self {
        Self::fade_alpha_by(target, -i16::from(u8::MAX), seconds)
    }

    pub fn try_fade_in(target: &SharedDrawable, seconds: f32) -> Result<Self> {
        check_duration(seconds)?;
        Ok(Self::fade_in(target, seconds))
    }

    pub fn try_fade_out(target: &SharedDrawable, seconds: f32) -> Result<Self> {
        check_duration(seconds)?;
        Ok(Self::fade_out(target, seconds))
    }

    fn tick(&mut self, dt: f32, direction: PlayDirection) -> FrameState {
        if self.base.should_skip(KIND) {
            return self.base.status();
        }

        if self.initial.is_none() {
            let mut captured = None;
            match with_target(&self.target, KIND, |d| captured = Some(d.alpha())) {
                TargetAccess::Gone => {
                    self.base.complete(KIND);
                    return self.base.status();
                }
                TargetAccess::Busy => return self.base.status(),
                TargetAccess::Applied => {}
            }
            self.initial = captured;
        }
        self.base.begin(KIND);

        let progress = self.base.advance(dt);
        let initial = f32::from(self.initial.unwrap_or(0));
        let value = initial + f32::from(self.displacement) * direction.sign() * progress.eased;
        let alpha = value.round().clamp(0.0, 255.0) as u8;
        log::trace!("{KIND} '{}' alpha {alpha}", self.base.label());

        match with_target(&self.target, KIND, |d| d.set_alpha(alpha)) {
            TargetAccess::Gone => self.base.complete(KIND),
            TargetAccess::Busy => {}
            TargetAccess::Applied if progress.finished => self.base.complete(KIND),
            TargetAccess::Applied => {}
        }
        self.base.status()
    }
}

impl Action for FadeAlphaAction {
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

    fn rewind(&mut self) {
        if let Some(initial) = self.initial.take() {
            with_target(&self.target, KIND, |d| d.set_alpha(initial));
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
