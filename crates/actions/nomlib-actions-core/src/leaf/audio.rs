//! Actions driving an audio collaborator.

use std::rc::Rc;

use crate::action::{Action, ActionBase};
use crate::Result;
use crate::status::{FrameState, PlayDirection};
use crate::targets::{
    read_target, with_target, SharedAudio, TargetAccess, WeakAudio, MAX_GAIN, MIN_GAIN,
};

use super::check_duration;

const PLAY: &str = "PlayAudioSource";
const FADE: &str = "FadeAudioGainBy";

/// Plays a sound for its full length.
///
/// Pausing, resuming and rewinding the action pause, resume and stop the sound.
/// Playback has no direction, so `prev_frame` behaves like `next_frame`.
#[derive(Debug, Clone)]
pub struct PlayAudioSource {
    base: ActionBase,
    source: Option<WeakAudio>,
}

impl PlayAudioSource {
    pub fn new(source: &SharedAudio) -> Self {
        let source = Some(Rc::downgrade(source));
        let duration = read_target(&source, |s| s.duration()).unwrap_or_else(|| {
            log::warn!("{PLAY}: source unavailable, assuming zero duration");
            0.0
        });
        Self {
            base: ActionBase::new(duration),
            source,
        }
    }

    /// Started and still holding the sound.
    fn is_sounding(&self) -> bool {
        self.base.is_started() && !self.base.is_completed()
    }

    fn tick(&mut self, dt: f32) -> FrameState {
        if self.base.should_skip(PLAY) {
            return self.base.status();
        }
        if !self.base.is_started() {
            match with_target(&self.source, PLAY, |s| s.play()) {
                TargetAccess::Gone => {
                    self.base.complete(PLAY);
                    return self.base.status();
                }
                TargetAccess::Busy => return self.base.status(),
                TargetAccess::Applied => {
                    self.base.begin(PLAY);
                }
            }
        }
        if self.base.advance(dt).finished {
            self.base.complete(PLAY);
        }
        self.base.status()
    }
}

impl Action for PlayAudioSource {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        PLAY
    }

    fn next_frame(&mut self, dt: f32) -> FrameState {
        self.tick(dt)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.tick(dt)
    }

    fn pause(&mut self) {
        if self.is_sounding() && !self.base.is_paused() {
            with_target(&self.source, PLAY, |s| s.pause());
        }
        self.base.pause();
    }

    fn resume(&mut self) {
        if self.is_sounding() && self.base.is_paused() {
            with_target(&self.source, PLAY, |s| s.resume());
        }
        self.base.resume();
    }

    fn rewind(&mut self) {
        if self.base.is_started() {
            with_target(&self.source, PLAY, |s| s.stop());
        }
        self.base.reset();
    }

    fn release(&mut self) {
        if self.is_sounding() {
            with_target(&self.source, PLAY, |s| s.stop());
        }
        self.source = None;
    }

    fn clone_action(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GainMode {
    By(f32),
    To(f32),
}

/// Interpolates a sound's gain, clamped to `[MIN_GAIN, MAX_GAIN]`.
///
/// This is the per-tick replacement for fade loops that sleep between gain steps.
#[derive(Debug, Clone)]
pub struct FadeAudioGainBy {
    base: ActionBase,
    source: Option<WeakAudio>,
    mode: GainMode,
    initial: Option<f32>,
    delta: f32,
}

impl FadeAudioGainBy {
    pub fn new(source: &SharedAudio, delta: f32, seconds: f32) -> Self {
        Self::with_mode(source, GainMode::By(delta), seconds)
    }

    /// Fade to silence.
    pub fn fade_out(source: &SharedAudio, seconds: f32) -> Self {
        Self::with_mode(source, GainMode::To(MIN_GAIN), seconds)
    }

    pub fn try_new(source: &SharedAudio, delta: f32, seconds: f32) -> Result<Self> {
        check_duration(seconds)?;
        Ok(Self::new(source, delta, seconds))
    }

    fn with_mode(source: &SharedAudio, mode: GainMode, seconds: f32) -> Self {
        Self {
            base: ActionBase::new(seconds),
            source: Some(Rc::downgrade(source)),
            mode,
            initial: None,
            delta: 0.0,
        }
    }

    fn tick(&mut self, dt: f32, direction: PlayDirection) -> FrameState {
        if self.base.should_skip(FADE) {
            return self.base.status();
        }

        if self.initial.is_none() {
            let mut captured = None;
            match with_target(&self.source, FADE, |s| captured = Some(s.gain())) {
                TargetAccess::Gone => {
                    self.base.complete(FADE);
                    return self.base.status();
                }
                TargetAccess::Busy => return self.base.status(),
                TargetAccess::Applied => {}
            }
            let initial = captured.unwrap_or(MAX_GAIN).clamp(MIN_GAIN, MAX_GAIN);
            self.initial = Some(initial);
            self.delta = match self.mode {
                GainMode::By(delta) => delta,
                GainMode::To(gain) => gain - initial,
            };
        }
        self.base.begin(FADE);

        let progress = self.base.advance(dt);
        let initial = self.initial.unwrap_or(MAX_GAIN);
        let gain = (initial + self.delta * direction.sign() * progress.eased).clamp(MIN_GAIN, MAX_GAIN);
        log::trace!("{FADE} '{}' gain {gain:.3}", self.base.label());

        match with_target(&self.source, FADE, |s| s.set_gain(gain)) {
            TargetAccess::Gone => self.base.complete(FADE),
            TargetAccess::Applied if progress.finished => self.base.complete(FADE),
            _ => {}
        }
        self.base.status()
    }
}

impl Action for FadeAudioGainBy {
    fn base(&self) -> &ActionBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ActionBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        FADE
    }

    fn next_frame(&mut self, dt: f32) -> FrameState {
        self.tick(dt, PlayDirection::Forward)
    }

    fn prev_frame(&mut self, dt: f32) -> FrameState {
        self.tick(dt, PlayDirection::Reverse)
    }

    fn rewind(&mut self) {
        if let Some(initial) = self.initial.take() {
            with_target(&self.source, FADE, |s| s.set_gain(initial));
        }
        self.delta = 0.0;
        self.base.reset();
    }

    fn release(&mut self) {
        self.source = None;
    }

    fn clone_action(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}
