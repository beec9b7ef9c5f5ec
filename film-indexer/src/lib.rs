//! # Film Indexer
//!
//! Main library for the incremental film indexer.
//!
//! This crate provides the entry point and configuration for copying film
//! works changed in Postgres into the OpenSearch index.

pub mod config;

pub use config::{Dependencies, EtlConfig};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] film_indexer_pipeline::PipelineError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
