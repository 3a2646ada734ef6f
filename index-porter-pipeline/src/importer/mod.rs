//! Importer module for the index porter.
//!
//! Reads newline-delimited JSON records and bulk-loads them into an index
//! in fixed-size chunks, accounting for per-document failures.

use std::path::Path;
use std::sync::Arc;

use serde_json::value::RawValue;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::{info, instrument};

use crate::errors::PipelineError;
use index_porter_repository::{Document, SearchEngineClient};

/// Default maximum number of documents per bulk write.
const DEFAULT_BATCH_SIZE: usize = 1000;

/// Configuration for the importer.
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Maximum number of documents submitted in one bulk write.
    pub batch_size: usize,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Importer that bulk-loads NDJSON records into an index.
///
/// The input is parsed in full before the first write, so a malformed line
/// aborts the import without touching the index. Chunks are submitted
/// strictly in sequence; the first chunk with any rejected document stops
/// the import, and documents already committed stay committed.
pub struct Importer {
    client: Arc<dyn SearchEngineClient>,
    config: ImporterConfig,
}

impl Importer {
    /// Create a new importer with the default configuration.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            client,
            config: ImporterConfig::default(),
        }
    }

    /// Create a new importer with custom configuration.
    pub fn with_config(client: Arc<dyn SearchEngineClient>, config: ImporterConfig) -> Self {
        Self { client, config }
    }

    /// Import every record of the NDJSON file at `path` into `index`.
    ///
    /// Returns the number of documents imported.
    pub async fn import_from_file(
        &self,
        index: &str,
        path: &Path,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<u64, PipelineError> {
        let file = File::open(path).await?;
        let reader = BufReader::new(file);

        self.import(index, reader, shutdown).await
    }

    /// Import every record read from `reader` into `index`.
    ///
    /// Blank lines are skipped; every other line must parse as one JSON
    /// value. Records are chunked in input order and each chunk is submitted
    /// as a single bulk write.
    #[instrument(skip(self, reader, shutdown))]
    pub async fn import<R>(
        &self,
        index: &str,
        reader: R,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<u64, PipelineError>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        let documents = read_documents(reader).await?;
        let total = documents.len();
        info!(count = total, "Parsed documents from input");

        let mut imported: u64 = 0;

        for (chunk_index, chunk) in documents.chunks(self.config.batch_size).enumerate() {
            let start = chunk_index * self.config.batch_size;
            let end = start + chunk.len();

            let summary = tokio::select! {
                // A pending shutdown must win over an already-resolved write.
                biased;
                _ = shutdown.recv() => {
                    info!("Importer received shutdown signal");
                    return Err(PipelineError::Cancelled);
                }
                result = self.client.bulk_index(index, chunk) => {
                    result.map_err(|e| PipelineError::chunk_failed(start, end, e))?
                }
            };

            if !summary.is_success() {
                return Err(PipelineError::bulk_rejected(start, end, summary.failures));
            }

            imported += chunk.len() as u64;
            info!(imported = imported, total = total, "Imported documents");
        }

        Ok(imported)
    }
}

/// Read NDJSON lines into opaque documents, failing fast on the first
/// malformed line.
async fn read_documents<R>(reader: R) -> Result<Vec<Document>, PipelineError>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut lines = reader.lines();
    let mut documents = Vec::new();
    let mut line_number: usize = 0;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;

        if line.is_empty() {
            continue;
        }

        let document = RawValue::from_string(line)
            .map_err(|e| PipelineError::parse(line_number, e.to_string()))?;
        documents.push(document);
    }

    Ok(documents)
}
