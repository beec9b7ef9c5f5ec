//! Checkpoint persistence.

mod json_file;

pub use json_file::JsonFileCheckpointStore;

/// Key under which the last indexed film work timestamp is stored.
pub const WATERMARK_KEY: &str = "last_updated_item_timestamp";
