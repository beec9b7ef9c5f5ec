//! Loader module for the film indexer pipeline.
//!
//! Sends batches to the search index and moves the checkpoint forward.

mod retry;

pub use retry::RetryPolicy;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::errors::PipelineError;
use film_indexer_repository::{
    BulkSummary, CheckpointStore, SearchError, SearchIndexProvider, WATERMARK_KEY,
};
use film_indexer_shared::{Batch, Watermark};

/// When a submitted batch moves the watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckpointPolicy {
    /// Advance only when every document of the batch was accepted. After a
    /// batch with a rejected document the watermark is held for the rest of
    /// the run, so the rejected film work is extracted again next run.
    #[default]
    FullBatch,
    /// Advance when at least one document of the batch was accepted. Rejected
    /// documents are logged and not retried by later runs.
    AnyDocument,
}

impl FromStr for CheckpointPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full_batch" => Ok(Self::FullBatch),
            "any_document" => Ok(Self::AnyDocument),
            other => Err(format!(
                "unknown checkpoint policy '{}', expected 'full_batch' or 'any_document'",
                other
            )),
        }
    }
}

impl fmt::Display for CheckpointPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullBatch => f.write_str("full_batch"),
            Self::AnyDocument => f.write_str("any_document"),
        }
    }
}

/// Configuration for the search loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// When a batch advances the watermark.
    pub checkpoint_policy: CheckpointPolicy,
    /// Backoff for transient search failures.
    pub retry: RetryPolicy,
}

/// Outcome of loading one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Documents accepted by the index.
    pub succeeded: usize,
    /// Documents rejected by the index.
    pub failed: usize,
    /// Watermark persisted because of this batch, if any.
    pub advanced_to: Option<Watermark>,
}

impl LoadReport {
    fn from_summary(summary: &BulkSummary, advanced_to: Option<Watermark>) -> Self {
        Self {
            succeeded: summary.succeeded,
            failed: summary.failed,
            advanced_to,
        }
    }
}

/// Loader that indexes batches into the search engine.
///
/// The loader is responsible for:
/// - Submitting each batch in a single bulk request
/// - Retrying transient failures with exponential backoff
/// - Persisting the watermark according to the checkpoint policy
pub struct SearchLoader {
    client: Arc<dyn SearchIndexProvider>,
    checkpoint: Arc<dyn CheckpointStore>,
    config: LoaderConfig,
    persisted: Option<Watermark>,
    holding: bool,
}

impl SearchLoader {
    /// Create a new search loader with default configuration.
    pub fn new(client: Arc<dyn SearchIndexProvider>, checkpoint: Arc<dyn CheckpointStore>) -> Self {
        Self::with_config(client, checkpoint, LoaderConfig::default())
    }

    /// Create a new search loader with custom configuration.
    pub fn with_config(
        client: Arc<dyn SearchIndexProvider>,
        checkpoint: Arc<dyn CheckpointStore>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            client,
            checkpoint,
            config,
            persisted: None,
            holding: false,
        }
    }

    /// Start a run from `watermark`.
    ///
    /// The loader never persists a watermark at or below this one.
    pub fn resume_from(&mut self, watermark: Watermark) {
        self.persisted = Some(watermark);
        self.holding = false;
    }

    /// Last watermark the loader persisted or resumed from.
    pub fn watermark(&self) -> Option<Watermark> {
        self.persisted
    }

    /// Load a batch into the search index.
    ///
    /// An empty batch is a no-op. Transient transport failures are retried per
    /// the retry policy; anything else aborts the load. Rejected documents are
    /// logged and counted, and do not fail the load.
    #[instrument(skip(self, batch), fields(documents = batch.len()))]
    pub async fn load(&mut self, batch: Batch) -> Result<LoadReport, PipelineError> {
        let Some(candidate) = batch.watermark() else {
            debug!("Skipping empty batch");
            return Ok(LoadReport::default());
        };

        info!(count = batch.len(), "Sending batch to search index");

        let client = &self.client;
        let batch_ref = &batch;
        let summary = self
            .config
            .retry
            .run("bulk_index", SearchError::is_transient, move || async move {
                client.bulk_index(batch_ref).await
            })
            .await?;

        for failure in summary.failures() {
            error!(
                id = %failure.id,
                status = ?failure.status,
                error = %failure.error.clone().unwrap_or_default(),
                "Document rejected by search index"
            );
        }

        let advance = match self.config.checkpoint_policy {
            CheckpointPolicy::AnyDocument => summary.any_succeeded(),
            CheckpointPolicy::FullBatch => {
                if !summary.all_succeeded() && !self.holding {
                    warn!(
                        failed = summary.failed,
                        watermark = ?self.persisted.map(|w| w.to_string()),
                        "Holding watermark for the rest of the run"
                    );
                    self.holding = true;
                }
                !self.holding
            }
        };

        let advanced_to = if advance {
            self.advance(candidate)?
        } else {
            None
        };

        Ok(LoadReport::from_summary(&summary, advanced_to))
    }

    /// Persist `candidate` if it is newer than the current watermark.
    fn advance(&mut self, candidate: Watermark) -> Result<Option<Watermark>, PipelineError> {
        if self.persisted.is_some_and(|current| candidate <= current) {
            debug!(candidate = %candidate, "Watermark not newer, keeping current");
            return Ok(None);
        }

        self.checkpoint.set(WATERMARK_KEY, &candidate.to_string())?;
        self.persisted = Some(candidate);

        info!(watermark = %candidate, "Advanced watermark");
        Ok(Some(candidate))
    }

    /// Ensure the search index exists.
    pub async fn ensure_index(&self) -> Result<(), PipelineError> {
        let client = &self.client;
        self.config
            .retry
            .run("ensure_index", SearchError::is_transient, move || async move {
                client.ensure_index_exists().await
            })
            .await
            .map_err(PipelineError::from)
    }
}
