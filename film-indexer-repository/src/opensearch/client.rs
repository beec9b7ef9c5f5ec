//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{BuildError, SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, OpenSearch,
};
use serde_json::Value;
use std::error::Error as _;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::IndexConfig;
use crate::types::BulkSummary;
use film_indexer_shared::Batch;

/// OpenSearch client implementation.
///
/// # Example
///
/// ```ignore
/// use film_indexer_repository::opensearch::IndexConfig;
/// let client = OpenSearchClient::new("http://localhost:9200", IndexConfig::new("movies")).await?;
///
/// client.ensure_index_exists().await?;
/// let summary = client.bulk_index(&batch).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index configuration containing the index name
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If connection setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, index = %index_config.name, "Created OpenSearch client");

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Name of the index this client writes to.
    pub fn index_name(&self) -> &str {
        &self.index_config.name
    }

    /// Map a failed `send()` to a search error.
    ///
    /// Only network failures are transient; a request the client could not
    /// build or serialize fails the same way on every attempt.
    fn transport_error(err: opensearch::Error) -> SearchError {
        let message = err.to_string();
        if err.is_timeout() {
            return SearchError::timeout(message);
        }
        if err.is_json() {
            return SearchError::serialization(message);
        }
        match err.source() {
            None => SearchError::invalid_request(message),
            Some(source) if source.is::<BuildError>() => SearchError::invalid_request(message),
            Some(_) => SearchError::connection(message),
        }
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    #[instrument(skip(self, batch), fields(documents = batch.len()))]
    async fn bulk_index(&self, batch: &Batch) -> Result<BulkSummary, SearchError> {
        let body: Vec<JsonBody<Value>> = batch
            .to_bulk_lines()
            .map_err(|e| SearchError::serialization(e.to_string()))?
            .into_iter()
            .map(JsonBody::from)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_config.name))
            .body(body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchError::from_status(status.as_u16(), error_body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let summary = BulkSummary::from_response(&body)?;
        if summary.total != batch.len() {
            return Err(SearchError::bulk_index(format!(
                "Bulk response has {} items for {} documents",
                summary.total,
                batch.len()
            )));
        }

        debug!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk request completed"
        );
        Ok(summary)
    }

    async fn ensure_index_exists(&self) -> Result<(), SearchError> {
        let name = self.index_config.name.as_str();

        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[name]))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if response.status_code().is_success() {
            debug!(index = %name, "Index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(name))
            .body(self.index_config.settings())
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            // Another writer may have created it between the two calls.
            if error_body.contains("resource_already_exists_exception") {
                return Ok(());
            }
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %name, "Created search index");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let status = health
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        debug!(status = %status, "OpenSearch cluster status");
        Ok(status == "green" || status == "yellow")
    }
}
