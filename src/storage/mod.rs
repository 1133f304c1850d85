//! Checkpoint persistence.
//!
//! The only durable state is a single line holding the identifier of the most
//! recently forwarded item.
//!
//! ## Storage Layout
//!
//! ```text
//! {working dir}/
//! └── last.txt       # last forwarded identifier, overwritten wholesale
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Checkpoint;

// Re-export for convenience
pub use local::LocalCheckpoint;

/// Trait for checkpoint storage backends.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Read the stored checkpoint; a missing value yields an empty checkpoint.
    async fn read_last(&self) -> Result<Checkpoint>;

    /// Overwrite the stored checkpoint.
    async fn write_last(&self, checkpoint: &Checkpoint) -> Result<()>;
}
