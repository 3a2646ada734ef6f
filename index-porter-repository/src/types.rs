//! Shared types for the search engine client.
//!
//! Documents are carried as opaque raw JSON so the transfer pipelines never
//! interpret or reshape record bodies.

use serde_json::value::RawValue;

/// An opaque document body.
///
/// The raw bytes are preserved exactly as the index (or the input file)
/// produced them; the porter never deserializes a document into a domain
/// type.
pub type Document = Box<RawValue>;

/// One page of documents returned by a cursor-paginated scan.
#[derive(Debug)]
pub struct ScanPage {
    /// Cursor for fetching the next page, when the server returned one.
    pub cursor_id: Option<String>,
    /// Document bodies in the order the index yielded them.
    pub documents: Vec<Document>,
}

/// A single rejected item from a bulk write.
#[derive(Debug, Clone)]
pub struct BulkItemFailure {
    /// Zero-based position of the document within the submitted batch.
    pub position: usize,
    /// Status code the index reported for the item.
    pub status: u16,
    /// Failure reason the index reported for the item.
    pub message: String,
}

/// Aggregated outcome of a single bulk write.
///
/// A summary is returned for every bulk call that succeeded at the transport
/// level; item-level rejections are data here, not an `Err`.
#[derive(Debug, Clone)]
pub struct BulkWriteSummary {
    /// Number of documents submitted in the batch.
    pub total: usize,
    /// Failures for the documents the index rejected.
    pub failures: Vec<BulkItemFailure>,
}

impl BulkWriteSummary {
    /// Summary for a batch the index accepted in full.
    pub fn success(total: usize) -> Self {
        Self {
            total,
            failures: Vec::new(),
        }
    }

    /// Number of documents the index accepted.
    pub fn succeeded(&self) -> usize {
        self.total - self.failures.len()
    }

    /// Whether every document in the batch was accepted.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Basic authentication credentials for the search engine.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}
