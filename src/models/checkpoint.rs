// src/models/checkpoint.rs

//! Checkpoint and run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of the most recently forwarded item.
///
/// An empty checkpoint means every item in the feed is new.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Checkpoint {
    pub last_identifier: String,
}

impl Checkpoint {
    pub fn new(last_identifier: impl Into<String>) -> Self {
        Self {
            last_identifier: last_identifier.into().trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.last_identifier.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.last_identifier
    }
}

/// Outcome of one forwarding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Items present in the feed snapshot
    pub feed_count: usize,

    /// Items newer than the previous checkpoint
    pub new_count: usize,

    /// Items actually delivered
    pub forwarded: usize,

    /// Identifiers skipped because their document could not be sanitized
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,

    /// Checkpoint to persist after the run
    pub checkpoint: Checkpoint,
}

impl RunSummary {
    /// Whether the checkpoint should be written back.
    pub fn should_persist(&self) -> bool {
        self.forwarded > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_trims() {
        let cp = Checkpoint::new("  abc-123\n");
        assert_eq!(cp.as_str(), "abc-123");
        assert!(!cp.is_empty());
        assert!(Checkpoint::new("\n").is_empty());
    }

    #[test]
    fn test_should_persist_only_after_forwarding() {
        let now = Utc::now();
        let mut summary = RunSummary {
            start_time: now,
            end_time: now,
            feed_count: 3,
            new_count: 1,
            forwarded: 0,
            skipped: vec!["1".to_string()],
            checkpoint: Checkpoint::new("0"),
        };
        assert!(!summary.should_persist());
        summary.forwarded = 1;
        assert!(summary.should_persist());
    }
}
