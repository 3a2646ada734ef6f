//! Error types for the search engine client.

mod search_error;

pub use search_error::SearchError;
