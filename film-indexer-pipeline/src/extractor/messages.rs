//! Message types for the extractor.
//!
//! Defines what flows from the extractor to the rest of the pipeline.

use film_indexer_repository::SourceError;
use film_indexer_shared::RawFilmWork;

/// Messages that flow out of the extractor.
#[derive(Debug)]
pub enum ExtractMessage {
    /// A changed film work.
    Record(RawFilmWork),
    /// Every changed film work has been sent.
    End,
    /// Extraction failed; no further messages follow.
    Error(SourceError),
}
