//! HTTP client for a hosted sheet service.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::fetch::{ApiKey, BasicClient, HttpClient, fetch_text};
use crate::services::sheet_api::SheetApi;

const DEFAULT_BASE_URL: &str = "https://sheets.example.org";

/// [`SheetApi`] implementation for hosts exposing
/// `GET {base_url}/sheets/{key}/export?format=csv`.
pub struct HostedSheetClient {
    base_url: String,
    client: Box<dyn HttpClient>,
}

impl HostedSheetClient {
    pub fn new(base_url: &str, client: Box<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Builds the client from the environment: `SHEET_BASE_URL` overrides
    /// the host, and when `SHEET_API_KEY` is set requests carry it as a
    /// bearer token.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("SHEET_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let client: Box<dyn HttpClient> = match std::env::var("SHEET_API_KEY") {
            Ok(key) if !key.is_empty() => Box::new(ApiKey::bearer(BasicClient::new(), &key)),
            _ => Box::new(BasicClient::new()),
        };

        Self::new(&base_url, client)
    }

    fn export_url(&self, key: &str) -> String {
        format!("{}/sheets/{}/export?format=csv", self.base_url, key)
    }
}

#[async_trait]
impl SheetApi for HostedSheetClient {
    async fn fetch_sheet(&self, key: &str) -> Result<String> {
        let url = self.export_url(key);
        debug!(key, url = %url, "Fetching sheet");
        fetch_text(self.client.as_ref(), &url).await
    }
}
