//! HTTP client for the upstream listing service

use reqwest::{Client, ClientBuilder};
use storelink_config::Settings;
use storelink_core::error::StoreError;
use storelink_core::types::{Catalog, ProductId, SizeMap};
use tracing::{debug, instrument, warn};

use crate::ClientResult;

/// Lookup type sent with every listing request
const LOOKUP_TYPE: &str = "ProductId";

/// Main HTTP client for listing and probe operations
#[derive(Debug, Clone)]
pub struct StoreClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Resolved configuration
    settings: Settings,
}

impl StoreClient {
    /// Create a client with default settings
    pub fn new() -> ClientResult<Self> {
        Self::with_settings(Settings::default())
    }

    /// Create a client from resolved settings
    pub fn with_settings(settings: Settings) -> ClientResult<Self> {
        let client = ClientBuilder::new()
            // Connection pooling configuration
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            // Listing request timeout; probes set their own per request
            .timeout(settings.timeout)
            .gzip(true)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| StoreError::upstream(format!("Failed to create HTTP client: {}", e), e))?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// POST the product-id lookup form and return the listing body.
    ///
    /// Any response that arrives is scanned, whatever its status; only
    /// transport failures, timeouts and unreadable bodies are errors.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn fetch_listing(&self, product_id: &ProductId) -> ClientResult<String> {
        let form = [
            ("type", LOOKUP_TYPE),
            ("url", product_id.as_str()),
            ("ring", self.settings.ring.as_str()),
            ("lang", self.settings.lang.as_str()),
        ];

        let response = self
            .client
            .post(&self.settings.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| StoreError::upstream(format!("Failed to fetch listing: {}", e), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Listing service returned non-success status, scanning body anyway");
        }

        response
            .text()
            .await
            .map_err(|e| StoreError::upstream(format!("Failed to read listing: {}", e), e))
    }

    /// Fetch and parse the catalog for a product
    pub async fn build_catalog(&self, product_id: &ProductId) -> ClientResult<Catalog> {
        let html = self.fetch_listing(product_id).await?;
        let catalog = crate::listing::parse_listing(&html);

        debug!(product_id = %product_id, total = catalog.total(), "Built catalog");
        Ok(catalog)
    }

    /// Probe the sizes of up to ten URLs. Never fails as a whole.
    pub async fn probe_sizes(&self, urls: &[String]) -> SizeMap {
        crate::probe::probe_sizes(&self.client, urls, self.settings.probe_timeout).await
    }
}
