//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::request::JsonBody,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    BulkParts, ClearScrollParts, OpenSearch, ScrollParts, SearchParts,
};
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::requests::{
    self, BulkIndexDirective, BulkLine, ContinuePage, FullScanQuery, ReleaseCursor,
};
use crate::opensearch::responses::{BulkResponse, ScanResponse};
use crate::types::{BasicAuth, BulkWriteSummary, Document, ScanPage};

/// OpenSearch client implementation.
///
/// Provides cursor-paginated scans and bulk writes using OpenSearch as the
/// backend.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchClient::new("http://localhost:9200", None).await?;
/// let page = client.scan("entities", 1000, Duration::from_secs(120)).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `auth` - Optional basic authentication credentials
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If connection setup fails
    pub async fn new(url: &str, auth: Option<BasicAuth>) -> Result<Self, SearchError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some(BasicAuth { username, password }) = auth {
            builder = builder.auth(Credentials::Basic(username, password));
        }
        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client })
    }

    /// Read a scan or continuation response into a page of documents.
    async fn read_page(response: Response, operation: &str) -> Result<ScanPage, SearchError> {
        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Scan request failed");
            return Err(SearchError::query(format!(
                "{} failed with status {}: {}",
                operation, status, body
            )));
        }

        let scan: ScanResponse = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        Ok(scan.into_page())
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    async fn scan(
        &self,
        index: &str,
        page_size: i64,
        cursor_ttl: Duration,
    ) -> Result<ScanPage, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .scroll(&requests::ttl(cursor_ttl))
            .size(page_size)
            .body(FullScanQuery::new())
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let page = Self::read_page(response, "scan").await?;
        debug!(index = %index, count = page.documents.len(), "Fetched initial scan page");
        Ok(page)
    }

    async fn continue_scan(
        &self,
        cursor_id: &str,
        cursor_ttl: Duration,
    ) -> Result<ScanPage, SearchError> {
        let response = self
            .client
            .scroll(ScrollParts::None)
            .body(ContinuePage::new(cursor_id, cursor_ttl))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let page = Self::read_page(response, "cursor continuation").await?;
        debug!(count = page.documents.len(), "Fetched continuation page");
        Ok(page)
    }

    async fn release_cursor(&self, cursor_id: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .clear_scroll(ClearScrollParts::None)
            .body(ReleaseCursor::new(cursor_id))
            .send()
            .await
            .map_err(|e| SearchError::release(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::release(format!(
                "cursor release failed with status {}: {}",
                status, body
            )));
        }

        debug!("Cursor released");
        Ok(())
    }

    async fn bulk_index(
        &self,
        index: &str,
        documents: &[Document],
    ) -> Result<BulkWriteSummary, SearchError> {
        let mut body: Vec<JsonBody<BulkLine>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            body.push(BulkLine::Directive(BulkIndexDirective::new(index)).into());
            body.push(BulkLine::Document(document.as_ref()).into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::bulk(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Bulk request failed");
            return Err(SearchError::bulk(format!(
                "bulk write failed with status {}: {}",
                status, body
            )));
        }

        let bulk: BulkResponse = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let failures = bulk.failures();
        debug!(
            total = documents.len(),
            failed = failures.len(),
            "Bulk write completed"
        );

        Ok(BulkWriteSummary {
            total: documents.len(),
            failures,
        })
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(opensearch::cluster::ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let health: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let status = health
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown");

        info!(status = %status, "OpenSearch cluster status");

        Ok(status == "green" || status == "yellow")
    }
}
