//! Capabilities the scheduler needs from rendering and audio collaborators.
//!
//! Actions hold targets through [`Weak`] references. The host keeps the strong
//! `Rc<RefCell<..>>`; once it is dropped, actions that point at it complete without
//! touching anything.

use std::cell::RefCell;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// Minimum audio gain.
pub const MIN_GAIN: f32 = 0.0;
/// Maximum audio gain.
pub const MAX_GAIN: f32 = 1.0;

/// 2D vector used for positions and scale factors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        self + (to - self) * t
    }

    /// Component-wise product.
    #[inline]
    pub fn scale_by(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x * other.x, self.y * other.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Vec2::new(x, y)
    }
}

/// Something on screen that actions can move, fade, scale or re-frame.
pub trait Drawable {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);

    /// Opacity; 0 is transparent and 255 opaque.
    fn alpha(&self) -> u8;
    fn set_alpha(&mut self, alpha: u8);

    fn scale(&self) -> Vec2;
    fn set_scale(&mut self, scale: Vec2);

    /// Index of the texture frame currently shown.
    fn frame(&self) -> u32;
    fn set_frame(&mut self, frame: u32);

    /// Remove the drawable from whatever is rendering it.
    fn detach(&mut self) {}

    /// Drop the texture backing this drawable.
    fn release_texture(&mut self) {}
}

/// A playable sound with a settable gain.
pub trait AudioSource {
    /// Current gain in `[MIN_GAIN, MAX_GAIN]`.
    fn gain(&self) -> f32;
    fn set_gain(&mut self, gain: f32);

    fn play(&mut self);
    fn stop(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);

    /// Length of the sound in seconds.
    fn duration(&self) -> f32;
}

pub type SharedDrawable = Rc<RefCell<dyn Drawable>>;
pub type SharedAudio = Rc<RefCell<dyn AudioSource>>;
pub type WeakDrawable = Weak<RefCell<dyn Drawable>>;
pub type WeakAudio = Weak<RefCell<dyn AudioSource>>;

/// Outcome of trying to reach a target for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetAccess {
    /// The closure ran against the target.
    Applied,
    /// The target is borrowed elsewhere; try again next frame.
    Busy,
    /// The target has been dropped or released.
    Gone,
}

/// Run `f` against a weakly held target, without panicking on a conflicting borrow.
pub fn with_target<T: ?Sized>(
    target: &Option<Weak<RefCell<T>>>,
    label: &str,
    f: impl FnOnce(&mut T),
) -> TargetAccess {
    let Some(strong) = target.as_ref().and_then(Weak::upgrade) else {
        log::warn!("{label}: target is gone");
        return TargetAccess::Gone;
    };
    let Ok(mut guard) = strong.try_borrow_mut() else {
        log::warn!("{label}: target is already borrowed, skipping frame");
        return TargetAccess::Busy;
    };
    f(&mut guard);
    TargetAccess::Applied
}

/// Read a value from a weakly held target.
pub fn read_target<T: ?Sized, R>(
    target: &Option<Weak<RefCell<T>>>,
    f: impl FnOnce(&T) -> R,
) -> Option<R> {
    let strong = target.as_ref().and_then(Weak::upgrade)?;
    let guard = strong.try_borrow().ok()?;
    Some(f(&guard))
}
