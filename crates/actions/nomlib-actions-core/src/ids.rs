//! Run identifiers and the allocator shared between a player and its spawners.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Identifier of one run owned by an [`ActionPlayer`](crate::ActionPlayer).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic allocator for RunId.
/// Clones share the same counter so spawners hand out ids the player will not reuse.
#[derive(Clone, Default, Debug)]
pub struct IdAllocator {
    next_run: Rc<Cell<u64>>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_run(&self) -> RunId {
        let id = self.next_run.get();
        self.next_run.set(id.wrapping_add(1));
        RunId(id)
    }
}
