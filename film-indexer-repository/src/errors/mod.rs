//! Error types for the film indexer repository.

mod checkpoint_error;
mod search_error;
mod source_error;

pub use checkpoint_error::CheckpointError;
pub use search_error::SearchError;
pub use source_error::SourceError;
