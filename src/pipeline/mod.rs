//! Pipeline entry points for forwarder operations.
//!
//! - `calculate_diff`: select items newer than the checkpoint
//! - `forward`: deliver a parsed batch and compute the next checkpoint
//! - `run_forwarder`: full run against a checkpoint store

pub mod diff;
pub mod forward;

pub use diff::{DiffResult, calculate_diff};
pub use forward::{ForwardContext, compose_message, fetch_items, forward, run_forwarder};
