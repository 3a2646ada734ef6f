//! Search error types.
//!
//! This module defines the error types that can occur during search engine
//! operations.

use thiserror::Error;

/// Errors that can occur during search engine operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A scan or cursor continuation failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A bulk write failed outright.
    #[error("Bulk write error: {0}")]
    BulkError(String),

    /// A cursor release failed.
    #[error("Cursor release error: {0}")]
    ReleaseError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a bulk write error.
    pub fn bulk(msg: impl Into<String>) -> Self {
        Self::BulkError(msg.into())
    }

    /// Create a cursor release error.
    pub fn release(msg: impl Into<String>) -> Self {
        Self::ReleaseError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
