use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::action::Action;
use crate::ids::{IdAllocator, RunId};
use crate::player::RunOptions;

/// Deferred request made through an [`ActionSpawner`].
pub(crate) enum SpawnRequest {
    Run {
        id: RunId,
        action: Box<dyn Action>,
        options: RunOptions,
    },
    Stop(String),
    StopRun(RunId),
}

pub(crate) type SpawnQueue = Rc<RefCell<Vec<SpawnRequest>>>;

/// Cloneable handle for adding or stopping runs while the player is updating.
///
/// Completion callbacks and callback actions run inside `update`, where the player
/// itself is borrowed. They capture a spawner instead; its requests are applied once
/// the update has finished stepping every run. Spawned runs start queued and are first
/// stepped on the following update.
#[derive(Clone)]
pub struct ActionSpawner {
    ids: IdAllocator,
    queue: SpawnQueue,
}

impl ActionSpawner {
    pub(crate) fn new(ids: IdAllocator, queue: SpawnQueue) -> Self {
        Self { ids, queue }
    }

    /// Queue a run. The id is reserved immediately.
    pub fn run(&self, action: Box<dyn Action>, options: RunOptions) -> RunId {
        let id = self.ids.alloc_run();
        self.queue
            .borrow_mut()
            .push(SpawnRequest::Run { id, action, options });
        id
    }

    pub fn enqueue(&self, action: Box<dyn Action>) -> RunId {
        self.run(action, RunOptions::new())
    }

    /// Queue a stop of every run with this name.
    pub fn stop(&self, name: impl Into<String>) {
        self.queue.borrow_mut().push(SpawnRequest::Stop(name.into()));
    }

    pub fn stop_run(&self, id: RunId) {
        self.queue.borrow_mut().push(SpawnRequest::StopRun(id));
    }

    /// Requests waiting to be applied.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl fmt::Debug for ActionSpawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSpawner")
            .field("pending", &self.pending())
            .finish()
    }
}
