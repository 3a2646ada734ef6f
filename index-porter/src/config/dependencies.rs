//! Dependency initialization and wiring for the index porter.

use std::sync::Arc;
use tracing::info;

use crate::PorterError;
use index_porter_pipeline::{Exporter, Importer};
use index_porter_repository::{BasicAuth, OpenSearchClient, SearchEngineClient};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Exporter wired to the search engine client.
    pub exporter: Exporter,
    /// Importer wired to the search engine client.
    pub importer: Importer,
}

impl Dependencies {
    /// Initialize all dependencies for the given server.
    ///
    /// Creates the OpenSearch client and verifies the cluster is reachable
    /// before any pipeline runs.
    ///
    /// # Arguments
    ///
    /// * `url` - OpenSearch server URL
    /// * `auth` - Optional basic authentication credentials
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(PorterError)` - If initialization fails
    pub async fn new(url: &str, auth: Option<BasicAuth>) -> Result<Self, PorterError> {
        info!(url = %url, "Initializing dependencies");

        let client = OpenSearchClient::new(url, auth).await.map_err(|e| {
            PorterError::config(format!("Failed to create OpenSearch client: {}", e))
        })?;

        let healthy = client
            .health_check()
            .await
            .map_err(|e| PorterError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(PorterError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        let client: Arc<dyn SearchEngineClient> = Arc::new(client);

        Ok(Self {
            exporter: Exporter::new(client.clone()),
            importer: Importer::new(client),
        })
    }
}
