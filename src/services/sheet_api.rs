//! Trait for remote sheet providers.

use anyhow::Result;

/// Abstraction over a key-addressed sheet host.
///
/// A sheet key is an opaque string; the provider resolves it to a wide
/// delimited table (first column entity, remaining columns one per time
/// period) returned as raw text. Reshaping happens in the parser, not
/// here.
#[async_trait::async_trait]
pub trait SheetApi: Send + Sync {
    /// Returns the delimited text of the sheet addressed by `key`.
    async fn fetch_sheet(&self, key: &str) -> Result<String>;
}
