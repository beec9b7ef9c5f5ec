//! Orchestrator module for the film indexer pipeline.
//!
//! Coordinates the extractor, transformer, and loader components for one run.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::PipelineError;
use crate::extractor::{ExtractMessage, FilmWorkExtractor};
use crate::loader::SearchLoader;
use crate::transformer::FilmTransformer;
use film_indexer_repository::{CheckpointStore, WATERMARK_KEY};
use film_indexer_shared::{Batch, Watermark};

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Size of the extractor channel buffer.
    pub channel_buffer_size: usize,
    /// Watermark to start from when none has been persisted yet.
    pub initial_watermark: Watermark,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: 1,
            initial_watermark: Watermark::initial(),
        }
    }
}

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Film works received from the extractor.
    pub extracted: usize,
    /// Non-empty batches submitted.
    pub batches: usize,
    /// Documents the index accepted.
    pub documents_indexed: usize,
    /// Documents the index rejected.
    pub documents_failed: usize,
    /// Watermark the next run starts from.
    pub watermark: Option<Watermark>,
}

/// Orchestrator that coordinates the pipeline components.
///
/// The orchestrator:
/// - Reads the persisted watermark once at startup
/// - Spawns the extractor and routes its records through the transformer
/// - Hands each full batch to the loader before accepting more records
/// - Stops on end of stream, the first fatal error, or Ctrl-C
pub struct Orchestrator {
    extractor: FilmWorkExtractor,
    transformer: FilmTransformer,
    loader: SearchLoader,
    checkpoint: Arc<dyn CheckpointStore>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        extractor: FilmWorkExtractor,
        transformer: FilmTransformer,
        loader: SearchLoader,
        checkpoint: Arc<dyn CheckpointStore>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            extractor,
            transformer,
            loader,
            checkpoint,
            config,
        }
    }

    /// Run the pipeline once, from the persisted watermark to end of stream.
    ///
    /// Ctrl-C at any point of the run ends it with [`PipelineError::Cancelled`].
    pub async fn run(&mut self) -> Result<RunSummary, PipelineError> {
        self.run_until(ctrl_c()).await
    }

    /// Run the pipeline once, or until `shutdown` completes.
    ///
    /// Any error is fatal: the extractor is stopped and the watermark stays
    /// at the last value the loader persisted. Shutdown is observed while a
    /// batch is in flight or backing off as well, and ends the run with
    /// [`PipelineError::Cancelled`].
    #[instrument(skip(self, shutdown))]
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<RunSummary, PipelineError>
    where
        F: Future<Output = ()>,
    {
        let since = self.load_watermark()?;
        info!(
            watermark = %since,
            batch_size = self.transformer.batch_size(),
            "Starting film indexer run"
        );
        self.loader.resume_from(since);

        tokio::pin!(shutdown);
        let mut summary = RunSummary::default();

        let result = tokio::select! {
            result = self.execute(since, &mut summary) => result,
            _ = &mut shutdown => {
                warn!("Received shutdown signal");
                Err(PipelineError::Cancelled)
            }
        };

        if let Err(e) = result {
            error!(
                error = %e,
                extracted = summary.extracted,
                watermark = ?self.loader.watermark().map(|w| w.to_string()),
                "Run aborted"
            );
            return Err(e);
        }

        summary.watermark = self.loader.watermark();
        info!(
            extracted = summary.extracted,
            batches = summary.batches,
            indexed = summary.documents_indexed,
            failed = summary.documents_failed,
            watermark = ?summary.watermark.map(|w| w.to_string()),
            "Run complete"
        );

        Ok(summary)
    }

    /// Persisted watermark, or the configured initial one if none was stored.
    fn load_watermark(&self) -> Result<Watermark, PipelineError> {
        match self.checkpoint.get(WATERMARK_KEY)? {
            Some(value) => Ok(Watermark::parse(&value)?),
            None => {
                info!(
                    watermark = %self.config.initial_watermark,
                    "No watermark persisted, starting from initial watermark"
                );
                Ok(self.config.initial_watermark)
            }
        }
    }

    /// Bootstrap the index, then stream every change through to the loader.
    async fn execute(
        &mut self,
        since: Watermark,
        summary: &mut RunSummary,
    ) -> Result<(), PipelineError> {
        self.loader.ensure_index().await?;

        let (tx, mut rx) = mpsc::channel::<ExtractMessage>(self.config.channel_buffer_size.max(1));

        let extractor = self.extractor.clone();
        let mut extractor_task =
            AbortOnDrop(tokio::spawn(async move { extractor.run(since, tx).await }));

        self.drive(&mut rx, summary).await?;

        let sent = (&mut extractor_task.0)
            .await
            .map_err(|e| PipelineError::extractor(e.to_string()))??;
        debug!(sent = sent, "Extractor finished");

        Ok(())
    }

    async fn drive(
        &mut self,
        rx: &mut mpsc::Receiver<ExtractMessage>,
        summary: &mut RunSummary,
    ) -> Result<(), PipelineError> {
        loop {
            match rx.recv().await {
                Some(ExtractMessage::Record(record)) => {
                    summary.extracted += 1;
                    if let Some(batch) = self.transformer.push(record) {
                        self.submit(batch, summary).await?;
                    }
                }
                Some(ExtractMessage::End) => {
                    let batch = self.transformer.finish();
                    return self.submit(batch, summary).await;
                }
                Some(ExtractMessage::Error(e)) => {
                    return Err(e.into());
                }
                None => {
                    return Err(PipelineError::channel(
                        "Extractor stopped without signalling end of stream",
                    ));
                }
            }
        }
    }

    async fn submit(
        &mut self,
        batch: Batch,
        summary: &mut RunSummary,
    ) -> Result<(), PipelineError> {
        if batch.is_empty() {
            return Ok(());
        }

        let report = self.loader.load(batch).await?;
        summary.batches += 1;
        summary.documents_indexed += report.succeeded;
        summary.documents_failed += report.failed;
        Ok(())
    }
}

/// Aborts the extractor task when the run stops early.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
