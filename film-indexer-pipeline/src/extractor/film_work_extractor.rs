//! Film work extractor implementation.
//!
//! Reads film works changed since a watermark and forwards them, one at a
//! time, to the pipeline.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::errors::PipelineError;
use crate::extractor::messages::ExtractMessage;
use film_indexer_repository::FilmWorkSource;
use film_indexer_shared::Watermark;

/// Extractor for changed film works.
#[derive(Clone)]
pub struct FilmWorkExtractor {
    source: Arc<dyn FilmWorkSource>,
}

impl FilmWorkExtractor {
    /// Create a new extractor over the given source.
    pub fn new(source: Arc<dyn FilmWorkSource>) -> Self {
        Self { source }
    }

    /// Stream every film work changed after `since` into `sender`.
    ///
    /// Records are sent in the order the source yields them, followed by
    /// [`ExtractMessage::End`]. A source error is forwarded as
    /// [`ExtractMessage::Error`] and ends extraction; nothing is retried here.
    ///
    /// # Arguments
    ///
    /// * `since` - Watermark of the last indexed film work
    /// * `sender` - Channel to send messages to
    ///
    /// # Returns
    ///
    /// * `Ok(count)` - Number of records sent
    /// * `Err(PipelineError::ChannelError)` - If the receiving side went away
    #[instrument(skip(self, sender), fields(since = %since))]
    pub async fn run(
        &self,
        since: Watermark,
        sender: mpsc::Sender<ExtractMessage>,
    ) -> Result<usize, PipelineError> {
        info!("Starting film work extraction");

        let mut stream = self.source.changed_since(since);
        let mut count = 0;

        while let Some(item) = stream.next().await {
            match item {
                Ok(record) => {
                    debug!(id = %record.id, title = %record.title, "Extracted film work");
                    sender
                        .send(ExtractMessage::Record(record))
                        .await
                        .map_err(|e| PipelineError::channel(e.to_string()))?;
                    count += 1;
                }
                Err(e) => {
                    error!(error = %e, extracted = count, "Extraction failed");
                    let _ = sender.send(ExtractMessage::Error(e)).await;
                    return Ok(count);
                }
            }
        }

        info!(count = count, "Extraction finished");
        sender
            .send(ExtractMessage::End)
            .await
            .map_err(|e| PipelineError::channel(e.to_string()))?;

        Ok(count)
    }
}
