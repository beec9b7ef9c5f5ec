//! Transformer module for the film indexer pipeline.
//!
//! Reshapes raw film works into search documents and groups them into batches.

mod film_transformer;

pub use film_transformer::{FilmTransformer, DEFAULT_BATCH_SIZE};
