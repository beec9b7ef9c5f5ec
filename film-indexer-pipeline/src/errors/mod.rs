//! Error types for the film indexer pipeline.

use film_indexer_repository::{CheckpointError, SearchError, SourceError};
use film_indexer_shared::WatermarkParseError;
use thiserror::Error;

/// Errors that can occur in the film indexer pipeline.
///
/// Every variant is fatal to the run that raised it; transient search
/// failures are retried inside the loader and only surface here once the
/// retry policy gives up.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the extractor component.
    #[error("Extractor error: {0}")]
    ExtractorError(String),

    /// Error from the relational store.
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    /// Error from the search engine.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// Error reading or writing the checkpoint.
    #[error("Checkpoint error: {0}")]
    CheckpointError(#[from] CheckpointError),

    /// The persisted watermark could not be parsed.
    #[error("Invalid watermark: {0}")]
    InvalidWatermark(#[from] WatermarkParseError),

    /// Channel communication error.
    #[error("Channel error: {0}")]
    ChannelError(String),

    /// Pipeline was cancelled or interrupted.
    #[error("Pipeline cancelled")]
    Cancelled,
}

impl PipelineError {
    /// Create an extractor error.
    pub fn extractor(msg: impl Into<String>) -> Self {
        Self::ExtractorError(msg.into())
    }

    /// Create a channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::ChannelError(msg.into())
    }
}
