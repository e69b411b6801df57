//! State module for tracking scan progress
//!
//! # Components
//!
//! - `RunState`: lifecycle of one worker-pool run (idle, filling, draining, done)
//! - `RunTracker`: shared, observable handle on a run's current `RunState`
//! - `UrlOutcome`: what happened to a single queued URL

mod run_state;
mod url_outcome;

// Re-export main types
pub use run_state::{RunState, RunTracker};
pub use url_outcome::UrlOutcome;
