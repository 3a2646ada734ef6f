//! # Index Porter Pipeline
//!
//! This crate provides the pipelines for moving documents between a search
//! index and newline-delimited JSON files.
//!
//! ## Architecture
//!
//! Two pipelines share one search engine client abstraction:
//!
//! 1. **Exporter**: drives a cursor-paginated scan and writes each document
//!    as one NDJSON line
//! 2. **Importer**: parses NDJSON lines, chunks them, and submits each chunk
//!    as one bulk write with per-document failure accounting

pub mod errors;
pub mod exporter;
pub mod importer;

pub use errors::PipelineError;
pub use exporter::{Exporter, ExporterConfig};
pub use importer::{Importer, ImporterConfig};
