//! # Index Porter
//!
//! Main library for the index porter CLI.
//!
//! This crate provides the entry point and configuration for running the
//! export and import pipelines against a search index.

pub mod config;

pub use config::Dependencies;

use thiserror::Error;

/// Errors that can occur during porter initialization or execution.
#[derive(Error, Debug)]
pub enum PorterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] index_porter_pipeline::PipelineError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] index_porter_repository::SearchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PorterError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
