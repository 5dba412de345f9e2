//! HTTP transport for remote sheet sources.
//!
//! [`HttpClient`] is the seam: the sheet client works against the trait so
//! tests and authenticated hosts can swap the transport without touching
//! the fetch logic.

mod auth;
mod basic;

pub use auth::ApiKey;
pub use basic::BasicClient;

use anyhow::{Result, bail};
use async_trait::async_trait;

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response>;
}

/// Fetches `url` and returns the response body as text.
///
/// Non-2xx statuses are errors; sheet hosts answer missing keys with 404
/// and the body would otherwise parse as an empty table.
pub async fn fetch_text(client: &dyn HttpClient, url: &str) -> Result<String> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    if !resp.status().is_success() {
        bail!("GET {} returned status {}", url, resp.status());
    }
    Ok(resp.text().await?)
}
