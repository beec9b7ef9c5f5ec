//! Batches of bulk entries handed from the transformer to the loader.

use serde_json::Value;

use crate::document::{BulkAction, FilmDocument};
use crate::watermark::Watermark;

/// Ordered action/document pairs plus the watermark candidate.
///
/// The candidate is the watermark of the last film work pushed, so it is only
/// meaningful when records are pushed in ascending timestamp order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    entries: Vec<(BulkAction, FilmDocument)>,
    watermark: Option<Watermark>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            watermark: None,
        }
    }

    /// Append a document and move the watermark candidate to `watermark`.
    pub fn push(&mut self, action: BulkAction, document: FilmDocument, watermark: Watermark) {
        self.entries.push((action, document));
        self.watermark = Some(watermark);
    }

    /// Number of documents in the batch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of bulk lines (one header plus one document per entry).
    pub fn line_count(&self) -> usize {
        self.entries.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Watermark of the last document pushed, if any.
    pub fn watermark(&self) -> Option<Watermark> {
        self.watermark
    }

    pub fn entries(&self) -> &[(BulkAction, FilmDocument)] {
        &self.entries
    }

    /// Bulk body lines, alternating action header and document.
    pub fn to_bulk_lines(&self) -> Result<Vec<Value>, serde_json::Error> {
        let mut lines = Vec::with_capacity(self.line_count());
        for (action, document) in &self.entries {
            lines.push(serde_json::to_value(action)?);
            lines.push(serde_json::to_value(document)?);
        }
        Ok(lines)
    }
}
