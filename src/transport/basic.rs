use super::client::HttpTransport;
use async_trait::async_trait;

/// [`HttpTransport`] backed by a long-lived [`reqwest::Client`].
///
/// The wrapped client holds the connection pool; clones of the owning
/// [`ApiClient`](crate::ApiClient) share it.
pub struct ReqwestTransport(reqwest::Client);

impl ReqwestTransport {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }

    /// Wraps a preconfigured session (timeouts, proxy, TLS settings).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self(client)
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
