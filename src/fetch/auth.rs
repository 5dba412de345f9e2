use async_trait::async_trait;
use reqwest::header::HeaderName;

use super::HttpClient;

/// An [`HttpClient`] wrapper that injects an API key as an HTTP header,
/// for sheet hosts that gate exports behind a token.
pub struct ApiKey<C> {
    inner: C,
    header_name: String,
    key: String,
}

impl<C> ApiKey<C> {
    pub fn new(inner: C, header_name: &str, key: &str) -> Self {
        Self {
            inner,
            header_name: header_name.to_string(),
            key: key.to_string(),
        }
    }

    /// `Authorization: Bearer <key>`, the usual shape for hosted sheet
    /// service tokens.
    pub fn bearer(inner: C, key: &str) -> Self {
        Self::new(inner, "Authorization", &format!("Bearer {key}"))
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let header_name = HeaderName::from_bytes(self.header_name.as_bytes())
            .expect("ApiKey: invalid header name");
        req.headers_mut()
            .insert(header_name, self.key.parse().expect("ApiKey: invalid header value"));
        self.inner.execute(req).await
    }
}
