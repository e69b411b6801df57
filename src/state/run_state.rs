//! Lifecycle of a single worker-pool run

use crate::HostsiftError;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Represents where a run is in its lifecycle
///
/// Runs only move forward: `Idle → Filling → Draining → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    /// Pool created, no URLs queued yet
    #[default]
    Idle,

    /// URL queue is being populated
    Filling,

    /// Queue is closed for input and workers are consuming it
    Draining,

    /// Every worker has returned; results are final
    Done,
}

impl RunState {
    /// Returns true if `next` is the state directly after this one
    pub fn can_transition_to(&self, next: RunState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Filling)
                | (Self::Filling, Self::Draining)
                | (Self::Draining, Self::Done)
        )
    }

    /// Moves to `next`, rejecting anything but the single forward step
    pub fn transition(self, next: RunState) -> Result<RunState, HostsiftError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(HostsiftError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Filling => "filling",
            Self::Draining => "draining",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared view of a run's current state
///
/// The pool advances it; any clone handed out beforehand observes every
/// step, including after `run` has consumed the pool.
#[derive(Debug, Clone, Default)]
pub struct RunTracker {
    state: Arc<Mutex<RunState>>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The state the run is in right now
    pub fn current(&self) -> RunState {
        *self.lock()
    }

    /// Moves the shared state one step forward
    pub fn advance(&self, next: RunState) -> Result<RunState, HostsiftError> {
        let mut state = self.lock();
        let from = *state;
        *state = from.transition(next)?;
        tracing::debug!("Run state: {} -> {}", from, next);
        Ok(next)
    }

    fn lock(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
