//! # Film Indexer Repository
//!
//! This crate provides traits and implementations for the film indexer's
//! external collaborators: the search index (OpenSearch), the relational
//! store the film works are read from (Postgres), and the file the run
//! checkpoint is kept in.

pub mod checkpoint;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod postgres;
pub mod types;

pub use checkpoint::{JsonFileCheckpointStore, WATERMARK_KEY};
pub use errors::{CheckpointError, SearchError, SourceError};
pub use interfaces::{CheckpointStore, FilmWorkSource, FilmWorkStream, SearchIndexProvider};
pub use self::opensearch::{IndexConfig, OpenSearchClient};
pub use postgres::{PoolConfig, PostgresFilmWorkSource};
pub use types::{BulkItemResult, BulkSummary};
