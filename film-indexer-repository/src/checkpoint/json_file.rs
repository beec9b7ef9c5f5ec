//! JSON file checkpoint store.
//!
//! The file holds a flat JSON object of string values. Every write reloads
//! the object, overlays the new key and replaces the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::errors::CheckpointError;
use crate::interfaces::CheckpointStore;

/// Checkpoint store backed by a `.json` file.
#[derive(Debug, Clone)]
pub struct JsonFileCheckpointStore {
    path: PathBuf,
}

impl JsonFileCheckpointStore {
    /// Open an existing checkpoint file.
    ///
    /// # Returns
    ///
    /// * `Ok(JsonFileCheckpointStore)` - If `path` is an existing `.json` file
    /// * `Err(CheckpointError::NotFound)` - If the file does not exist
    /// * `Err(CheckpointError::InvalidFormat)` - If the extension is not `.json`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CheckpointError> {
        let path = path.into();

        if !path.is_file() {
            return Err(CheckpointError::NotFound(path));
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            return Err(CheckpointError::InvalidFormat(path));
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole mapping.
    ///
    /// An empty or undecodable file reads as an empty mapping, which makes the
    /// next run start from the initial watermark.
    fn retrieve(&self) -> Result<Map<String, Value>, CheckpointError> {
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => {
                warn!(path = %self.path.display(), found = %other, "Checkpoint file is not a JSON object, ignoring it");
                Ok(Map::new())
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Checkpoint file is not valid JSON, ignoring it");
                Ok(Map::new())
            }
        }
    }

    /// Replace the file contents through a sibling temp file and a rename.
    fn save(&self, state: &Map<String, Value>) -> Result<(), CheckpointError> {
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_vec(state)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl CheckpointStore for JsonFileCheckpointStore {
    fn get(&self, key: &str) -> Result<Option<String>, CheckpointError> {
        let state = self.retrieve()?;

        Ok(match state.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(value)) => Some(value.clone()),
            Some(other) => Some(other.to_string()),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CheckpointError> {
        let mut state = self.retrieve()?;
        state.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&state)?;

        debug!(key = %key, value = %value, "Checkpoint saved");
        Ok(())
    }
}
