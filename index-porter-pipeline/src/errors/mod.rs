//! Error types for the transfer pipelines.

use index_porter_repository::{BulkItemFailure, SearchError};
use thiserror::Error;

/// Errors that can occur in the export and import pipelines.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the search engine.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// Error reading or writing a transfer file.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// An input line failed to parse as JSON.
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// A bulk write failed outright for a chunk of documents.
    #[error("Bulk write for documents {start}..{end} failed: {source}")]
    ChunkFailed {
        start: usize,
        end: usize,
        #[source]
        source: SearchError,
    },

    /// The index rejected individual documents within a chunk.
    #[error(
        "Bulk write for documents {start}..{end} rejected {} document(s): {}",
        .failures.len(),
        format_failures(.failures)
    )]
    BulkRejected {
        start: usize,
        end: usize,
        failures: Vec<BulkItemFailure>,
    },

    /// Pipeline was cancelled or interrupted.
    #[error("Pipeline cancelled")]
    Cancelled,
}

impl PipelineError {
    /// Create a parse error for an input line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a chunk transport failure with the affected document range.
    pub fn chunk_failed(start: usize, end: usize, source: SearchError) -> Self {
        Self::ChunkFailed { start, end, source }
    }

    /// Create a partial bulk failure listing every rejected document.
    pub fn bulk_rejected(start: usize, end: usize, failures: Vec<BulkItemFailure>) -> Self {
        Self::BulkRejected {
            start,
            end,
            failures,
        }
    }
}

fn format_failures(failures: &[BulkItemFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("position {} (status {}): {}", f.position, f.status, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_reports_line() {
        let error = PipelineError::parse(3, "expected value at column 1");

        assert_eq!(
            error.to_string(),
            "Parse error at line 3: expected value at column 1"
        );
    }

    #[test]
    fn test_bulk_rejected_lists_positions_and_messages() {
        let error = PipelineError::bulk_rejected(
            0,
            10,
            vec![
                BulkItemFailure {
                    position: 2,
                    status: 400,
                    message: "failed to parse".to_string(),
                },
                BulkItemFailure {
                    position: 5,
                    status: 409,
                    message: "version conflict".to_string(),
                },
            ],
        );

        let message = error.to_string();
        assert!(message.contains("documents 0..10"));
        assert!(message.contains("rejected 2 document(s)"));
        assert!(message.contains("position 2 (status 400): failed to parse"));
        assert!(message.contains("position 5 (status 409): version conflict"));
    }

    #[test]
    fn test_chunk_failed_carries_range() {
        let error = PipelineError::chunk_failed(1000, 2000, SearchError::bulk("timed out"));

        let message = error.to_string();
        assert!(message.contains("documents 1000..2000"));
        assert!(message.contains("timed out"));
    }
}
