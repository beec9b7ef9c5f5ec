//! Extractor module for the film indexer pipeline.
//!
//! Streams changed film works out of the relational store.

mod film_work_extractor;
mod messages;

pub use film_work_extractor::FilmWorkExtractor;
pub use messages::ExtractMessage;
