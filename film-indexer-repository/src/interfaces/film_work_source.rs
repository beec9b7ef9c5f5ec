//! Film work source trait definition.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::errors::SourceError;
use film_indexer_shared::{RawFilmWork, Watermark};

/// Lazy, finite stream of changed film works.
pub type FilmWorkStream<'a> = BoxStream<'a, Result<RawFilmWork, SourceError>>;

/// Read side of the relational store.
#[async_trait]
pub trait FilmWorkSource: Send + Sync {
    /// Stream every film work changed after `since`.
    ///
    /// A film work counts as changed when its own row, or any genre or person
    /// linked to it, was updated after the watermark. Records come out in
    /// ascending [`RawFilmWork::modified_at`] order so that the watermark of
    /// the last record seen never skips an earlier one.
    fn changed_since(&self, since: Watermark) -> FilmWorkStream<'_>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), SourceError>;
}
