//! # Film Indexer Pipeline
//!
//! This crate provides the pipeline components for copying changed film
//! works from Postgres into the search index.
//!
//! ## Architecture
//!
//! The pipeline follows the Extractor-Transformer-Loader pattern:
//!
//! 1. **Extractor**: Streams film works changed since the last watermark
//! 2. **Transformer**: Reshapes them into search documents and batches them
//! 3. **Loader**: Bulk indexes each batch and advances the watermark
//! 4. **Orchestrator**: Runs the three once, from startup watermark to end of stream

pub mod errors;
pub mod extractor;
pub mod loader;
pub mod orchestrator;
pub mod transformer;

#[cfg(test)]
mod test_support;

pub use errors::PipelineError;
