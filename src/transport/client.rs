use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes one wire request on the underlying session.
///
/// This is the seam between the client core and the network: production
/// code uses [`ReqwestTransport`](super::ReqwestTransport), tests can
/// substitute an implementation that observes or fails requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
