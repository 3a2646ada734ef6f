//! Typed request bodies for scan and bulk operations.
//!
//! These models serialize to the exact JSON shapes the search engine
//! expects, giving request construction compile-time structure instead of
//! freeform maps.

use serde::Serialize;
use serde_json::value::RawValue;
use std::time::Duration;

/// Render a cursor time-to-live as a search engine duration literal.
pub fn ttl(duration: Duration) -> String {
    format!("{}s", duration.as_secs())
}

/// Body of the initial full-scan query: matches every document in the index.
#[derive(Debug, Clone, Serialize)]
pub struct FullScanQuery {
    query: MatchAllClause,
}

#[derive(Debug, Clone, Serialize)]
struct MatchAllClause {
    match_all: MatchAll,
}

#[derive(Debug, Clone, Serialize)]
struct MatchAll {}

impl FullScanQuery {
    pub fn new() -> Self {
        Self {
            query: MatchAllClause {
                match_all: MatchAll {},
            },
        }
    }
}

/// Body of a cursor continuation request.
///
/// Sending the TTL again renews the cursor lease for another interval.
#[derive(Debug, Clone, Serialize)]
pub struct ContinuePage {
    scroll: String,
    scroll_id: String,
}

impl ContinuePage {
    pub fn new(cursor_id: &str, cursor_ttl: Duration) -> Self {
        Self {
            scroll: ttl(cursor_ttl),
            scroll_id: cursor_id.to_string(),
        }
    }
}

/// Body of a cursor release request.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseCursor {
    scroll_id: Vec<String>,
}

impl ReleaseCursor {
    pub fn new(cursor_id: &str) -> Self {
        Self {
            scroll_id: vec![cursor_id.to_string()],
        }
    }
}

/// Bulk action line directing one document into a target index.
#[derive(Debug, Clone, Serialize)]
pub struct BulkIndexDirective {
    index: IndexTarget,
}

#[derive(Debug, Clone, Serialize)]
struct IndexTarget {
    #[serde(rename = "_index")]
    index: String,
}

impl BulkIndexDirective {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: IndexTarget {
                index: index.into(),
            },
        }
    }
}

/// One line of a bulk request body: an action directive or a raw document.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BulkLine<'a> {
    Directive(BulkIndexDirective),
    Document(&'a RawValue),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn test_full_scan_query_shape() {
        let body = to_value(FullScanQuery::new()).unwrap();

        assert_eq!(body, json!({ "query": { "match_all": {} } }));
    }

    #[test]
    fn test_continue_page_shape() {
        let body = to_value(ContinuePage::new("cursor-abc", Duration::from_secs(120))).unwrap();

        assert_eq!(
            body,
            json!({ "scroll": "120s", "scroll_id": "cursor-abc" })
        );
    }

    #[test]
    fn test_release_cursor_shape() {
        let body = to_value(ReleaseCursor::new("cursor-abc")).unwrap();

        assert_eq!(body, json!({ "scroll_id": ["cursor-abc"] }));
    }

    #[test]
    fn test_bulk_index_directive_shape() {
        let body = to_value(BulkIndexDirective::new("entities")).unwrap();

        assert_eq!(body, json!({ "index": { "_index": "entities" } }));
    }

    #[test]
    fn test_bulk_line_document_is_transparent() {
        let raw = r#"{"name": "Test",  "value": 1}"#;
        let document = RawValue::from_string(raw.to_string()).unwrap();
        let line = BulkLine::Document(&document);

        assert_eq!(serde_json::to_string(&line).unwrap(), raw);
    }

    #[test]
    fn test_ttl_rendering() {
        assert_eq!(ttl(Duration::from_secs(120)), "120s");
        assert_eq!(ttl(Duration::from_secs(30)), "30s");
    }
}
