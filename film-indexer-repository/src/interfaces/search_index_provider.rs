//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::types::BulkSummary;
use film_indexer_shared::Batch;

/// Abstracts the underlying search index implementation (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into the loader to enable dependency injection and easy
/// testing with mock implementations.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Submit a batch to the bulk endpoint in a single request.
    ///
    /// Each action in the batch upserts its document by id, so submitting the
    /// same batch twice leaves one copy of every document.
    ///
    /// # Arguments
    ///
    /// * `batch` - Action/document pairs to index
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Per-document outcomes, in submission order
    /// * `Err(SearchError)` - If the request as a whole failed; see
    ///   [`SearchError::is_transient`] for which failures are worth retrying
    async fn bulk_index(&self, batch: &Batch) -> Result<BulkSummary, SearchError>;

    /// Ensure the search index exists with proper mappings.
    ///
    /// If the index doesn't exist, it will be created with the appropriate
    /// settings and mappings for film search.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index exists or was created successfully
    /// * `Err(SearchError)` - If index creation fails
    async fn ensure_index_exists(&self) -> Result<(), SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
