//! Typed response bodies for scan and bulk operations.
//!
//! Only the fields the porter needs are modeled; document bodies stay raw.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{BulkItemFailure, Document, ScanPage};

/// Response to an initial scan or a cursor continuation.
#[derive(Debug, Deserialize)]
pub struct ScanResponse {
    #[serde(rename = "_scroll_id")]
    pub scroll_id: Option<String>,
    pub hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct HitsEnvelope {
    pub hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub struct Hit {
    #[serde(rename = "_source")]
    pub source: Document,
}

impl ScanResponse {
    /// Convert into a page of opaque documents.
    pub fn into_page(self) -> ScanPage {
        ScanPage {
            cursor_id: self.scroll_id,
            documents: self.hits.hits.into_iter().map(|hit| hit.source).collect(),
        }
    }
}

/// Response to a bulk write.
#[derive(Debug, Deserialize)]
pub struct BulkResponse {
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<BulkResponseItem>,
}

/// A single item result within a bulk response.
#[derive(Debug, Deserialize)]
pub struct BulkResponseItem {
    pub index: Option<BulkItemStatus>,
}

#[derive(Debug, Deserialize)]
pub struct BulkItemStatus {
    pub status: u16,
    #[serde(default)]
    pub error: Option<Value>,
}

impl BulkResponse {
    /// Collect failures for the items the index rejected.
    ///
    /// An item counts as failed when its status code is 400 or above.
    pub fn failures(&self) -> Vec<BulkItemFailure> {
        if !self.errors {
            return Vec::new();
        }

        self.items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| {
                let status = item.index.as_ref()?;
                if status.status < 400 {
                    return None;
                }
                Some(BulkItemFailure {
                    position,
                    status: status.status,
                    message: describe_error(status.error.as_ref()),
                })
            })
            .collect()
    }
}

fn describe_error(error: Option<&Value>) -> String {
    match error {
        Some(value) => value
            .get("reason")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        None => "no error detail".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_response_into_page() {
        let body = r#"{
            "_scroll_id": "cursor-abc",
            "hits": {
                "hits": [
                    { "_index": "entities", "_source": {"name": "First"} },
                    { "_index": "entities", "_source": {"name": "Second", "n": 2} }
                ]
            }
        }"#;

        let response: ScanResponse = serde_json::from_str(body).unwrap();
        let page = response.into_page();

        assert_eq!(page.cursor_id.as_deref(), Some("cursor-abc"));
        assert_eq!(page.documents.len(), 2);
        assert_eq!(page.documents[0].get(), r#"{"name": "First"}"#);
        assert_eq!(page.documents[1].get(), r#"{"name": "Second", "n": 2}"#);
    }

    #[test]
    fn test_scan_response_empty_page() {
        let body = r#"{ "_scroll_id": "cursor-abc", "hits": { "hits": [] } }"#;

        let page = serde_json::from_str::<ScanResponse>(body).unwrap().into_page();

        assert!(page.documents.is_empty());
        assert_eq!(page.cursor_id.as_deref(), Some("cursor-abc"));
    }

    #[test]
    fn test_bulk_response_without_errors() {
        let body = r#"{
            "errors": false,
            "items": [ { "index": { "status": 201 } }, { "index": { "status": 201 } } ]
        }"#;

        let response: BulkResponse = serde_json::from_str(body).unwrap();

        assert!(response.failures().is_empty());
    }

    #[test]
    fn test_bulk_response_collects_rejected_items() {
        let body = r#"{
            "errors": true,
            "items": [
                { "index": { "status": 201 } },
                { "index": { "status": 201 } },
                { "index": { "status": 400, "error": { "type": "mapper_parsing_exception", "reason": "failed to parse" } } },
                { "index": { "status": 201 } },
                { "index": { "status": 201 } },
                { "index": { "status": 409, "error": { "type": "version_conflict_engine_exception", "reason": "version conflict" } } }
            ]
        }"#;

        let response: BulkResponse = serde_json::from_str(body).unwrap();
        let failures = response.failures();

        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].position, 2);
        assert_eq!(failures[0].status, 400);
        assert_eq!(failures[0].message, "failed to parse");
        assert_eq!(failures[1].position, 5);
        assert_eq!(failures[1].status, 409);
        assert_eq!(failures[1].message, "version conflict");
    }

    #[test]
    fn test_bulk_response_error_without_reason() {
        let body = r#"{
            "errors": true,
            "items": [ { "index": { "status": 500, "error": { "type": "exception" } } } ]
        }"#;

        let failures = serde_json::from_str::<BulkResponse>(body).unwrap().failures();

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message, r#"{"type":"exception"}"#);
    }

    #[test]
    fn test_bulk_response_ignores_sub_400_when_flagged() {
        // The errors flag can be set even when only some items failed.
        let body = r#"{
            "errors": true,
            "items": [
                { "index": { "status": 200 } },
                { "index": { "status": 404, "error": { "reason": "not found" } } }
            ]
        }"#;

        let failures = serde_json::from_str::<BulkResponse>(body).unwrap().failures();

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].position, 1);
    }
}
