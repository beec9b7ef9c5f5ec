//! Checkpoint store trait definition.

use crate::errors::CheckpointError;

/// Durable key/value mapping for pipeline progress.
///
/// Single-writer: implementations do not guard against concurrent writers.
pub trait CheckpointStore: Send + Sync {
    /// Value stored under `key`, or `None` if the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>, CheckpointError>;

    /// Store `value` under `key`, keeping every other key untouched.
    fn set(&self, key: &str, value: &str) -> Result<(), CheckpointError>;
}
