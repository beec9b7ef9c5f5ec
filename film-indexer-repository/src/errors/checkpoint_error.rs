//! Checkpoint storage error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing checkpoints.
#[derive(Error, Debug)]
pub enum CheckpointError {
    /// The checkpoint file does not exist.
    #[error("Checkpoint file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The checkpoint file is not a JSON file.
    #[error("Checkpoint file {} is not a .json file", .0.display())]
    InvalidFormat(PathBuf),

    /// Reading or writing the checkpoint file failed.
    #[error("Checkpoint IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The checkpoint mapping could not be serialized.
    #[error("Checkpoint serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
