use std::fmt;

/// Invoked once when a run completes on its own.
pub type CompletionCallback = Box<dyn FnOnce()>;

/// Options for adding a run to the player
#[derive(Default)]
pub struct RunOptions {
    /// Name for name-based control; generated when absent
    pub name: Option<String>,
    /// Called after the run completes and has been released
    pub on_complete: Option<CompletionCallback>,
    /// Drive the tree with `prev_frame` instead of `next_frame`
    pub reversed: bool,
    /// Overrides the player's name policy for this run
    pub exclusive: Option<bool>,
}

impl RunOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn with_on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    #[inline]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    #[inline]
    pub fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = Some(exclusive);
        self
    }
}

impl fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOptions")
            .field("name", &self.name)
            .field("on_complete", &self.on_complete.is_some())
            .field("reversed", &self.reversed)
            .field("exclusive", &self.exclusive)
            .finish()
    }
}
