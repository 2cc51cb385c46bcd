#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use nomlib_actions::{AudioSource, Drawable, SharedAudio, SharedDrawable, Vec2};

pub fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

pub fn approx_vec(a: Vec2, b: Vec2, eps: f32) {
    approx(a.x, b.x, eps);
    approx(a.y, b.y, eps);
}

/// In-memory drawable recording everything the scheduler does to it.
#[derive(Debug, Clone)]
pub struct MockSprite {
    pub position: Vec2,
    pub alpha: u8,
    pub scale: Vec2,
    pub frame: u32,
    pub frame_history: Vec<u32>,
    pub detached: bool,
    pub texture_released: bool,
}

impl Default for MockSprite {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            alpha: 255,
            scale: Vec2::ONE,
            frame: 0,
            frame_history: Vec::new(),
            detached: false,
            texture_released: false,
        }
    }
}

impl Drawable for MockSprite {
    fn position(&self) -> Vec2 {
        self.position
    }
    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
    fn alpha(&self) -> u8 {
        self.alpha
    }
    fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }
    fn scale(&self) -> Vec2 {
        self.scale
    }
    fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }
    fn frame(&self) -> u32 {
        self.frame
    }
    fn set_frame(&mut self, frame: u32) {
        self.frame = frame;
        self.frame_history.push(frame);
    }
    fn detach(&mut self) {
        self.detached = true;
    }
    fn release_texture(&mut self) {
        self.texture_released = true;
    }
}

/// Returns the concrete handle for assertions and the trait-object handle for actions.
pub fn sprite() -> (Rc<RefCell<MockSprite>>, SharedDrawable) {
    let concrete = Rc::new(RefCell::new(MockSprite::default()));
    let shared: SharedDrawable = concrete.clone();
    (concrete, shared)
}

pub fn sprite_at(position: Vec2) -> (Rc<RefCell<MockSprite>>, SharedDrawable) {
    let (concrete, shared) = sprite();
    concrete.borrow_mut().position = position;
    (concrete, shared)
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    Play,
    Stop,
    Pause,
    Resume,
}

/// In-memory audio source with a fixed length.
#[derive(Debug, Clone)]
pub struct MockAudio {
    pub gain: f32,
    pub length: f32,
    pub events: Vec<AudioEvent>,
}

impl MockAudio {
    pub fn new(length: f32) -> Self {
        Self {
            gain: 1.0,
            length,
            events: Vec::new(),
        }
    }
}

impl AudioSource for MockAudio {
    fn gain(&self) -> f32 {
        self.gain
    }
    fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }
    fn play(&mut self) {
        self.events.push(AudioEvent::Play);
    }
    fn stop(&mut self) {
        self.events.push(AudioEvent::Stop);
    }
    fn pause(&mut self) {
        self.events.push(AudioEvent::Pause);
    }
    fn resume(&mut self) {
        self.events.push(AudioEvent::Resume);
    }
    fn duration(&self) -> f32 {
        self.length
    }
}

pub fn audio(length: f32) -> (Rc<RefCell<MockAudio>>, SharedAudio) {
    let concrete = Rc::new(RefCell::new(MockAudio::new(length)));
    let shared: SharedAudio = concrete.clone();
    (concrete, shared)
}
