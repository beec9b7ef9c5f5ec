//! Configuration for the film indexer.
//!
//! Settings come from environment variables; a `.env` file is loaded first
//! when present.

mod dependencies;

pub use dependencies::Dependencies;

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::IndexingError;
use film_indexer_pipeline::loader::{CheckpointPolicy, RetryPolicy};
use film_indexer_pipeline::transformer::DEFAULT_BATCH_SIZE;
use film_indexer_repository::opensearch::DEFAULT_INDEX_NAME;
use film_indexer_shared::Watermark;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default checkpoint file.
const DEFAULT_CHECKPOINT_PATH: &str = "state_values.json";

/// Everything a run needs to know, resolved once at startup.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// OpenSearch base URL.
    pub opensearch_url: String,
    /// Target index.
    pub index_name: String,
    /// Film works per bulk request.
    pub batch_size: usize,
    /// JSON checkpoint file; must exist before the first run.
    pub checkpoint_path: PathBuf,
    /// Watermark used when the checkpoint file holds none.
    pub initial_watermark: Watermark,
    pub checkpoint_policy: CheckpointPolicy,
    pub retry: RetryPolicy,
}

impl EtlConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: Postgres connection string (required)
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `INDEX_NAME`: Target index (default: movies)
    /// - `BATCH_SIZE`: Film works per batch (default: 100)
    /// - `CHECKPOINT_PATH`: Checkpoint file (default: state_values.json)
    /// - `INITIAL_WATERMARK`: Start point without a checkpoint
    ///   (default: 2000-01-01T01:00:01.000001Z)
    /// - `CHECKPOINT_POLICY`: `full_batch` or `any_document` (default: full_batch)
    /// - `RETRY_INITIAL_DELAY_MS`, `RETRY_MULTIPLIER`, `RETRY_MAX_DELAY_MS`,
    ///   `RETRY_MAX_ATTEMPTS`: backoff for transient search failures
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    ///
    /// Unset and blank values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url =
            get("DATABASE_URL").ok_or_else(|| IndexingError::config("DATABASE_URL is not set"))?;

        let batch_size: usize = parse_or(&get, "BATCH_SIZE", DEFAULT_BATCH_SIZE)?;
        if batch_size == 0 {
            return Err(IndexingError::config("BATCH_SIZE must be at least 1"));
        }

        let initial_watermark = match get("INITIAL_WATERMARK") {
            Some(value) => Watermark::parse(&value)
                .map_err(|e| IndexingError::config(format!("INITIAL_WATERMARK: {}", e)))?,
            None => Watermark::initial(),
        };

        let defaults = RetryPolicy::default();
        let multiplier: f64 = parse_or(&get, "RETRY_MULTIPLIER", defaults.multiplier)?;
        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(IndexingError::config(
                "RETRY_MULTIPLIER must be a number of at least 1",
            ));
        }

        let max_attempts: u32 = parse_or(&get, "RETRY_MAX_ATTEMPTS", 0)?;
        let retry = RetryPolicy {
            initial_delay: Duration::from_millis(parse_or(
                &get,
                "RETRY_INITIAL_DELAY_MS",
                defaults.initial_delay.as_millis() as u64,
            )?),
            multiplier,
            max_delay: Duration::from_millis(parse_or(
                &get,
                "RETRY_MAX_DELAY_MS",
                defaults.max_delay.as_millis() as u64,
            )?),
            max_attempts: (max_attempts > 0).then_some(max_attempts),
        };

        Ok(Self {
            database_url,
            opensearch_url: get("OPENSEARCH_URL")
                .unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string()),
            index_name: get("INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            batch_size,
            checkpoint_path: get("CHECKPOINT_PATH")
                .unwrap_or_else(|| DEFAULT_CHECKPOINT_PATH.to_string())
                .into(),
            initial_watermark,
            checkpoint_policy: parse_or(&get, "CHECKPOINT_POLICY", CheckpointPolicy::default())?,
            retry,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, IndexingError>
where
    T: FromStr,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| IndexingError::config(format!("{}: invalid value '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}
