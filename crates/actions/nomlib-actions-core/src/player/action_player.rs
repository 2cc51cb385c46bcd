use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::action::Action;
use crate::config::{NamePolicy, PlayerConfig};
use crate::Result;
use crate::ids::{IdAllocator, RunId};
use crate::player::spawner::{SpawnQueue, SpawnRequest};
use crate::player::{
    ActionSpawner, CompletionCallback, PlayerMetrics, PlayerState, RunOptions, RunState,
};
use crate::status::PlayDirection;

/// One root action tree in flight.
struct Run {
    name: String,
    action: Box<dyn Action>,
    on_complete: Option<CompletionCallback>,
    direction: PlayDirection,
    state: RunState,
    started: bool,
}

impl fmt::Debug for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Run")
            .field("name", &self.name)
            .field("action", &self.action)
            .field("direction", &self.direction)
            .field("state", &self.state)
            .finish()
    }
}

/// Scheduler owning every root action tree currently in flight.
///
/// The host calls [`ActionPlayer::update`] once per frame with the elapsed delta; that is
/// the only tick source. Runs are stepped in the order they were added.
pub struct ActionPlayer {
    config: PlayerConfig,
    runs: IndexMap<RunId, Run>,
    ids: IdAllocator,
    state: PlayerState,
    pending: SpawnQueue,
    metrics: PlayerMetrics,
}

impl ActionPlayer {
    /// Create a player with the default configuration
    pub fn new() -> Self {
        Self::from_parts(PlayerConfig::default())
    }

    /// Create a player with a validated configuration
    pub fn with_config(config: PlayerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: PlayerConfig) -> Self {
        Self {
            config,
            runs: IndexMap::new(),
            ids: IdAllocator::new(),
            state: PlayerState::Running,
            pending: Rc::new(RefCell::new(Vec::new())),
            metrics: PlayerMetrics::new(),
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Take ownership of an action tree and schedule it. It is first stepped on the
    /// next `update`.
    pub fn run(&mut self, action: Box<dyn Action>, options: RunOptions) -> RunId {
        let id = self.ids.alloc_run();
        self.insert_run(id, action, options);
        id
    }

    /// Schedule an action with default options.
    pub fn enqueue(&mut self, action: Box<dyn Action>) -> RunId {
        self.run(action, RunOptions::new())
    }

    /// Schedule an action under a name.
    pub fn run_named(&mut self, action: Box<dyn Action>, name: impl Into<String>) -> RunId {
        self.run(action, RunOptions::new().with_name(name))
    }

    fn insert_run(&mut self, id: RunId, mut action: Box<dyn Action>, options: RunOptions) {
        let name = options
            .name
            .or_else(|| action.name().map(str::to_string))
            .unwrap_or_else(|| format!("{}-{}", self.config.generated_name_prefix, id));
        action.set_name(name.clone());
        action.inherit_timing_curve(self.config.default_timing_curve);

        let exclusive = options
            .exclusive
            .unwrap_or(self.config.name_policy == NamePolicy::Replace);
        if exclusive {
            let replaced = self.remove_where(|_, run| run.name == name);
            if replaced > 0 {
                log::warn!("another action named '{name}' was running; replaced {replaced} run(s)");
            }
        } else if self.action_running(&name) {
            log::debug!("'{name}' is already running; keeping both runs");
        }

        let direction = if options.reversed {
            PlayDirection::Reverse
        } else {
            PlayDirection::Forward
        };
        log::debug!("queued run {id} '{name}' ({})", action.kind());
        self.runs.insert(
            id,
            Run {
                name,
                action,
                on_complete: options.on_complete,
                direction,
                state: RunState::Queued,
                started: false,
            },
        );
        self.metrics.runs_started += 1;
        self.metrics.active_runs = self.runs.len();
    }

    /// Release and erase every run matching `predicate`, without invoking callbacks.
    fn remove_where(&mut self, mut predicate: impl FnMut(RunId, &Run) -> bool) -> usize {
        let doomed: Vec<RunId> = self
            .runs
            .iter()
            .filter(|(id, run)| predicate(**id, run))
            .map(|(id, _)| *id)
            .collect();
        for id in &doomed {
            if let Some(mut run) = self.runs.shift_remove(id) {
                run.action.release();
                log::debug!("cancelled run {id} '{}'", run.name);
            }
        }
        self.metrics.runs_cancelled += doomed.len() as u64;
        self.metrics.active_runs = self.runs.len();
        doomed.len()
    }

    /// Advance every run by `delta_time` seconds.
    ///
    /// Completed runs are removed and released before their completion callbacks fire.
    /// Requests made through a spawner during the update are applied at the end.
    /// Returns true while anything is still running or pending.
    pub fn update(&mut self, delta_time: f32) -> bool {
        self.metrics.ticks += 1;
        let dt = self.sanitize_delta(delta_time);
        self.metrics.last_delta = dt;

        if self.state == PlayerState::Running {
            // Collect run IDs to avoid mutable borrow issues while reaping
            let run_ids: Vec<RunId> = self.runs.keys().copied().collect();
            let mut finished = Vec::new();

            for id in run_ids {
                let Some(run) = self.runs.get_mut(&id) else {
                    continue;
                };
                if run.state == RunState::Paused {
                    continue;
                }
                run.state = RunState::Running;
                run.started = true;
                if run.action.step(dt, run.direction).is_completed() {
                    run.state = RunState::Completed;
                    finished.push(id);
                }
            }

            for id in finished {
                let Some(mut run) = self.runs.shift_remove(&id) else {
                    continue;
                };
                log::debug!(
                    "run {id} '{}' completed [remaining: {}]",
                    run.name,
                    self.runs.len()
                );
                run.action.release();
                self.metrics.runs_completed += 1;
                if let Some(callback) = run.on_complete.take() {
                    callback();
                }
            }
        }

        self.apply_pending();
        self.metrics.active_runs = self.runs.len();
        !self.idle()
    }

    fn sanitize_delta(&self, delta_time: f32) -> f32 {
        let dt = if delta_time.is_finite() && delta_time >= 0.0 {
            delta_time
        } else {
            log::warn!("invalid update delta {delta_time}, using 0");
            0.0
        };
        match self.config.max_delta_time {
            Some(max) if dt > max => {
                log::trace!("clamping update delta {dt} to {max}");
                max
            }
            _ => dt,
        }
    }

    fn apply_pending(&mut self) {
        let requests: Vec<SpawnRequest> = self.pending.borrow_mut().drain(..).collect();
        for request in requests {
            match request {
                SpawnRequest::Run {
                    id,
                    action,
                    options,
                } => self.insert_run(id, action, options),
                SpawnRequest::Stop(name) => {
                    self.stop(&name);
                }
                SpawnRequest::StopRun(id) => {
                    self.stop_run(id);
                }
            }
        }
    }

    /// Handle for scheduling from inside callbacks.
    pub fn spawner(&self) -> ActionSpawner {
        ActionSpawner::new(self.ids.clone(), self.pending.clone())
    }

    /// Release and erase every run with this name. Callbacks do not fire.
    /// Unknown names are ignored.
    pub fn stop(&mut self, name: &str) -> bool {
        self.remove_where(|_, run| run.name == name) > 0
    }

    pub fn stop_run(&mut self, id: RunId) -> bool {
        self.remove_where(|run_id, _| run_id == id) > 0
    }

    /// Release and erase every run and every pending spawn.
    pub fn stop_all(&mut self) {
        let cancelled = self.runs.len();
        for (_, mut run) in self.runs.drain(..) {
            run.action.release();
        }
        let dropped = self.pending.borrow_mut().drain(..).count();
        if cancelled > 0 || dropped > 0 {
            log::debug!("stopped {cancelled} run(s), dropped {dropped} pending request(s)");
        }
        self.metrics.runs_cancelled += cancelled as u64;
        self.metrics.active_runs = 0;
    }

    /// Pause every run with this name.
    pub fn pause(&mut self, name: &str) -> bool {
        let mut found = false;
        for run in self.runs.values_mut().filter(|run| run.name == name) {
            run.action.pause();
            run.state = RunState::Paused;
            found = true;
        }
        found
    }

    /// Resume every paused run with this name.
    pub fn resume(&mut self, name: &str) -> bool {
        let mut found = false;
        let player_running = self.state == PlayerState::Running;
        for run in self.runs.values_mut().filter(|run| run.name == name) {
            // A globally paused player resumes the action itself in `resume_all`.
            if player_running {
                run.action.resume();
            }
            if run.state == RunState::Paused {
                run.state = if run.started {
                    RunState::Running
                } else {
                    RunState::Queued
                };
            }
            found = true;
        }
        found
    }

    /// Reset every run with this name to its pre-play state.
    pub fn rewind(&mut self, name: &str) -> bool {
        let mut found = false;
        for run in self.runs.values_mut().filter(|run| run.name == name) {
            run.action.rewind();
            run.state = RunState::Queued;
            run.started = false;
            found = true;
        }
        found
    }

    /// Stop advancing anything until [`ActionPlayer::resume_all`].
    ///
    /// Every run not already paused by name is paused too, so actions driving a
    /// collaborator (a playing sound) suspend it.
    pub fn pause_all(&mut self) {
        if self.state == PlayerState::Paused {
            return;
        }
        self.state = PlayerState::Paused;
        for run in self.runs.values_mut().filter(|run| run.state != RunState::Paused) {
            run.action.pause();
        }
        log::debug!("player paused [{} run(s)]", self.runs.len());
    }

    /// Resume the player and every run that was not paused by name.
    pub fn resume_all(&mut self) {
        if self.state == PlayerState::Running {
            return;
        }
        self.state = PlayerState::Running;
        for run in self.runs.values_mut().filter(|run| run.state != RunState::Paused) {
            run.action.resume();
        }
        log::debug!("player resumed [{} run(s)]", self.runs.len());
    }

    pub fn player_state(&self) -> PlayerState {
        self.state
    }

    /// True when nothing is running and nothing is waiting to be added.
    pub fn idle(&self) -> bool {
        self.runs.is_empty() && self.pending.borrow().is_empty()
    }

    /// Number of runs currently held.
    pub fn num_actions(&self) -> usize {
        self.runs.len()
    }

    pub fn action_running(&self, name: &str) -> bool {
        self.runs.values().any(|run| run.name == name)
    }

    /// Root action of the first run with this name.
    pub fn action(&self, name: &str) -> Option<&dyn Action> {
        self.runs
            .values()
            .find(|run| run.name == name)
            .map(|run| run.action.as_ref())
    }

    pub fn run_state(&self, id: RunId) -> Option<RunState> {
        self.runs.get(&id).map(|run| run.state)
    }

    /// Name the run was registered under.
    pub fn run_name(&self, id: RunId) -> Option<&str> {
        self.runs.get(&id).map(|run| run.name.as_str())
    }

    pub fn metrics(&self) -> &PlayerMetrics {
        &self.metrics
    }
}

impl Default for ActionPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActionPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionPlayer")
            .field("state", &self.state)
            .field("runs", &self.runs)
            .field("pending", &self.pending.borrow().len())
            .field("metrics", &self.metrics)
            .finish()
    }
}
