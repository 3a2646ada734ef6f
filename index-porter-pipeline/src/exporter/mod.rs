//! Exporter module for the index porter.
//!
//! Streams every document of an index into a newline-delimited JSON sink
//! using a cursor-paginated scan.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

use crate::errors::PipelineError;
use index_porter_repository::{ScanPage, SearchEngineClient, SearchError};

/// Default number of documents requested per page.
const DEFAULT_PAGE_SIZE: i64 = 1000;

/// Default cursor time-to-live.
const DEFAULT_CURSOR_TTL: Duration = Duration::from_secs(120);

/// Configuration for the exporter.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Number of documents to request per page.
    pub page_size: i64,
    /// Cursor lease duration, renewed on every page request.
    pub cursor_ttl: Duration,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            cursor_ttl: DEFAULT_CURSOR_TTL,
        }
    }
}

/// Exporter that streams index documents into an NDJSON sink.
///
/// The exporter drives a cursor-paginated read loop: each page of documents
/// is written as one serialized line per record, and the cursor is released
/// once the index is exhausted.
pub struct Exporter {
    client: Arc<dyn SearchEngineClient>,
    config: ExporterConfig,
}

impl Exporter {
    /// Create a new exporter with the default configuration.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            client,
            config: ExporterConfig::default(),
        }
    }

    /// Create a new exporter with custom configuration.
    pub fn with_config(client: Arc<dyn SearchEngineClient>, config: ExporterConfig) -> Self {
        Self { client, config }
    }

    /// Export every document of `index` into a file at `path`.
    ///
    /// Returns the number of documents written.
    pub async fn export_to_file(
        &self,
        index: &str,
        path: &Path,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<u64, PipelineError> {
        let file = File::create(path).await?;
        let mut writer = BufWriter::new(file);

        let total = self.export(index, &mut writer, shutdown).await?;
        writer.flush().await?;

        Ok(total)
    }

    /// Export every document of `index` into `writer`, one JSON line each.
    ///
    /// Documents are written in the order the index yields them. The scan
    /// terminates on the first empty page; the cursor is then released, and
    /// a release failure is downgraded to a warning.
    #[instrument(skip(self, writer, shutdown))]
    pub async fn export<W>(
        &self,
        index: &str,
        writer: &mut W,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<u64, PipelineError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let mut total: u64 = 0;
        let mut cursor: Option<String> = None;

        loop {
            let page = tokio::select! {
                // A pending shutdown must win over an already-resolved page.
                biased;
                _ = shutdown.recv() => {
                    info!("Exporter received shutdown signal");
                    return Err(PipelineError::Cancelled);
                }
                page = self.next_page(index, cursor.as_deref()) => page?,
            };

            if page.cursor_id.is_some() {
                cursor = page.cursor_id;
            }

            if page.documents.is_empty() {
                break;
            }

            for document in &page.documents {
                writer.write_all(document.get().as_bytes()).await?;
                writer.write_all(b"\n").await?;
                total += 1;
            }

            info!(total = total, "Exported documents");
        }

        // Exhausted cursors may already be auto-released server-side.
        if let Some(cursor_id) = cursor {
            if let Err(e) = self.client.release_cursor(&cursor_id).await {
                warn!(error = %e, "Failed to release cursor");
            }
        }

        Ok(total)
    }

    async fn next_page(
        &self,
        index: &str,
        cursor: Option<&str>,
    ) -> Result<ScanPage, SearchError> {
        match cursor {
            None => {
                self.client
                    .scan(index, self.config.page_size, self.config.cursor_ttl)
                    .await
            }
            Some(cursor_id) => {
                self.client
                    .continue_scan(cursor_id, self.config.cursor_ttl)
                    .await
            }
        }
    }
}
