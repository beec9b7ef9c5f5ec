//! Interface definitions for the film indexer's external collaborators.
//!
//! The traits here let the pipeline run against OpenSearch, Postgres and a
//! checkpoint file in production, and against in-memory doubles in tests.

mod checkpoint_store;
mod film_work_source;
mod search_index_provider;

pub use checkpoint_store::CheckpointStore;
pub use film_work_source::{FilmWorkSource, FilmWorkStream};
pub use search_index_provider::SearchIndexProvider;
