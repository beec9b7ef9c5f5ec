//! Dependency initialization and wiring for the film indexer.

use std::sync::Arc;
use tracing::info;

use super::EtlConfig;
use crate::IndexingError;
use film_indexer_pipeline::{
    extractor::FilmWorkExtractor,
    loader::{LoaderConfig, SearchLoader},
    orchestrator::{Orchestrator, OrchestratorConfig},
    transformer::FilmTransformer,
};
use film_indexer_repository::{
    CheckpointStore, FilmWorkSource, IndexConfig, JsonFileCheckpointStore, OpenSearchClient,
    PoolConfig, PostgresFilmWorkSource, SearchIndexProvider,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from the given configuration.
    ///
    /// Opens the checkpoint file, connects to Postgres and OpenSearch and
    /// verifies both are reachable. Any failure here is a configuration
    /// error; nothing is retried.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If initialization fails
    pub async fn new(config: &EtlConfig) -> Result<Self, IndexingError> {
        info!(
            opensearch_url = %config.opensearch_url,
            index = %config.index_name,
            batch_size = config.batch_size,
            checkpoint_policy = %config.checkpoint_policy,
            "Initializing dependencies"
        );

        let checkpoint_store = JsonFileCheckpointStore::open(&config.checkpoint_path)
            .map_err(|e| IndexingError::config(format!("Failed to open checkpoint file: {}", e)))?;
        info!(path = %checkpoint_store.path().display(), "Checkpoint file opened");
        let checkpoint: Arc<dyn CheckpointStore> = Arc::new(checkpoint_store);

        // Initialize Postgres source
        let source = PostgresFilmWorkSource::connect(&config.database_url, PoolConfig::default())
            .await
            .map_err(|e| IndexingError::config(format!("Failed to connect to Postgres: {}", e)))?;

        source
            .ping()
            .await
            .map_err(|e| IndexingError::config(format!("Postgres is unreachable: {}", e)))?;

        info!("Postgres connection verified");

        // Initialize OpenSearch client
        let search_client =
            OpenSearchClient::new(&config.opensearch_url, IndexConfig::new(&config.index_name))
                .await
                .map_err(|e| {
                    IndexingError::config(format!("Failed to create OpenSearch client: {}", e))
                })?;

        // Verify OpenSearch is reachable
        let healthy = search_client
            .health_check()
            .await
            .map_err(|e| IndexingError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        let extractor = FilmWorkExtractor::new(Arc::new(source));
        let transformer = FilmTransformer::new(config.index_name.as_str(), config.batch_size);
        let loader = SearchLoader::with_config(
            Arc::new(search_client),
            checkpoint.clone(),
            LoaderConfig {
                checkpoint_policy: config.checkpoint_policy,
                retry: config.retry.clone(),
            },
        );

        let orchestrator = Orchestrator::new(
            extractor,
            transformer,
            loader,
            checkpoint,
            OrchestratorConfig {
                initial_watermark: config.initial_watermark,
                ..OrchestratorConfig::default()
            },
        );

        Ok(Self { orchestrator })
    }
}
