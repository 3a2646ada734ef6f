//! Search engine client trait definition.
//!
//! This module defines the abstract interface for the search engine
//! operations the transfer pipelines need, allowing for different backend
//! implementations (OpenSearch, Elasticsearch, mocks for testing).

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::SearchError;
use crate::types::{BulkWriteSummary, Document, ScanPage};

/// Abstract interface for search engine operations.
///
/// This trait defines the operations required to move documents between an
/// index and an external sink: a cursor-paginated full scan for reading, and
/// a bulk write for loading.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>` for consistent error handling.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Start a cursor-paginated full scan of an index.
    ///
    /// # Arguments
    ///
    /// * `index` - The index to scan
    /// * `page_size` - Maximum number of documents per page
    /// * `cursor_ttl` - How long the server should keep the cursor alive
    ///
    /// # Returns
    ///
    /// * `Ok(ScanPage)` - The first page of documents and the cursor for the
    ///   next one
    /// * `Err(SearchError)` - If the scan fails
    async fn scan(
        &self,
        index: &str,
        page_size: i64,
        cursor_ttl: Duration,
    ) -> Result<ScanPage, SearchError>;

    /// Fetch the next page for an open cursor.
    ///
    /// Every continuation refreshes the cursor lease with `cursor_ttl`, so a
    /// long-running scan never outlives its cursor as long as pages keep
    /// being requested.
    async fn continue_scan(
        &self,
        cursor_id: &str,
        cursor_ttl: Duration,
    ) -> Result<ScanPage, SearchError>;

    /// Release a cursor once the scan is exhausted.
    ///
    /// Callers should treat a release failure as non-fatal; the server
    /// expires exhausted cursors on its own.
    async fn release_cursor(&self, cursor_id: &str) -> Result<(), SearchError>;

    /// Write a batch of documents into an index in a single bulk call.
    ///
    /// Each document is paired with an index-into-target directive. A
    /// transport or whole-response failure is an `Err`; individual documents
    /// the index rejected are reported in the returned summary.
    async fn bulk_index(
        &self,
        index: &str,
        documents: &[Document],
    ) -> Result<BulkWriteSummary, SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
