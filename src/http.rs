//! Thin async HTTP layer shared by both source adapters.
//!
//! Not a browser — one GET per source per search, an explicit per-request
//! timeout, and a bounded redirect chain. There are no retries: a failed
//! request surfaces to the adapter, which decides via `FetchPolicy`
//! whether to degrade to zero results or propagate.

use std::time::Duration;
use url::Url;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Response from a single GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client shared by the adapters. Cheap to clone.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// GET `url` with per-request header overrides.
    ///
    /// Non-2xx statuses are returned, not treated as transport errors;
    /// each adapter owns its status handling.
    pub async fn get(
        &self,
        url: Url,
        headers: &[(&'static str, &str)],
    ) -> Result<HttpResponse, reqwest::Error> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}
