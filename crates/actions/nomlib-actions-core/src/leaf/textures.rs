use std::rc::Rc;

use crate::action::{Action, ActionBase};
use crate::error::ActionError;
use crate::Result;
use crate::status::{FrameState, PlayDirection};
use crate::targets::{with_target, SharedDrawable, TargetAccess, WeakDrawable};

use super::check_duration;

const KIND: &str = "AnimateTextures";

/// Steps a drawable through an ordered list of texture frames at a fixed interval.
///
/// The first frame is shown on the first tick. Reverse playback walks the list from the
/// last frame down to the first.
#[derive(Debug, Clone)]
pub struct AnimateTexturesAction {
    base: ActionBase,
    target: Option<WeakDrawable>,
    frames: Vec<u32>,
    interval: f32,
    shown: Option<usize>,
    initial: Option<u32>,
}

impl AnimateTexturesAction {
    /// An empty frame list is accepted and completes on the first tick.
    pub fn new(target: &SharedDrawable, frames: Vec<u32>, frame_interval: f32) -> Self {
        let interval = if frame_interval >= 0.0 { frame_interval } else { 0.0 };
        Self {
            base: ActionBase::new(frames.len() as f32 * interval),
            target: Some(Rc::downgrade(target)),
            frames,
            interval,
            shown: None,
            initial: None,
        }
    }

    pub fn try_new(target: &SharedDrawable, frames: Vec<u32>, frame_interval: f32) -> Result<Self> {
        if frames.is_empty() {
            return Err(ActionError::EmptyFrames);
        }
        check_duration(frame_interval)?;
        Ok(Self::new(target, frames, frame_interval))
    }

    /// Consecutive frames `first..first + count` of a sprite sheet.
    pub fn sprite_batch(target: &SharedDrawable, first: u32, count: u32, frame_interval: f32) -> Self {
        Self::new(target, (first..first.saturating_add(count)).collect(), frame_interval)
    }

    pub fn frames(&self) -> &[u32] {
        &self.frames
    }

    pub fn frame_interval(&self) -> f32 {
        self.interval
    }

    fn frame_index(&self, frame_time: f32, direction: PlayDirection) -> usize {
        let last = self.frames.len().saturating_sub(1);
        let step = if self.interval > 0.0 {
            ((frame_time / self.interval).floor() as usize).min(last)
        } else {
            last
        };
        match direction {
            PlayDirection::Forward => step,
            PlayDirection::Reverse => last - step,
        }
    }

    fn tick(&mut self, dt: f32, direction: PlayDirection) -> FrameState {
        if self.base.should_skip(KIND) {
            return self.base.status();
        }
        if self.frames.is_empty() {
            log::warn!("{KIND} '{}': no frames to show", self.base.label());
            self.base.complete(KIND);
            return self.base.status();
        }

        if self.initial.is_none() {
            let mut captured = None;
            match with_target(&self.target, KIND, |d| captured = Some(d.frame())) {
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
        let index = self.frame_index(progress.frame_time, direction);
        if self.shown != Some(index) {
            let frame = self.frames[index];
            match with_target(&self.target, KIND, |d| d.set_frame(frame)) {
                TargetAccess::Gone => {
                    self.base.complete(KIND);
                    return self.base.status();
                }
                TargetAccess::Busy => return self.base.status(),
                TargetAccess::Applied => {
                    log::trace!("{KIND} '{}' frame [{index}] = {frame}", self.base.label());
                    self.shown = Some(index);
                }
            }
        }
        if progress.finished {
            self.base.complete(KIND);
        }
        self.base.status()
    }
}

impl Action for AnimateTexturesAction {
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
            with_target(&self.target, KIND, |d| d.set_frame(initial));
        }
        self.shown = None;
        self.base.reset();
    }

    fn release(&mut self) {
        self.target = None;
    }

    fn clone_action(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}
