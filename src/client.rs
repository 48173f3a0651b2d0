//! Client state, request building, and the two delivery models.
//!
//! Both delivery models route through one private exchange (build,
//! execute, classify, read body); they differ only in the token
//! precondition and in how the raw outcome maps onto [`ApiError`].

use std::sync::{Arc, RwLock};

use bytes::Bytes;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, HeaderName};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::request::{ApiRequest, RequestSummary};
use crate::status::ResponseStatus;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Structured failure body some backends return with non-ok statuses.
/// Decoded best-effort for logging, never propagated.
#[derive(Debug, Deserialize)]
struct FailureMessage {
    message: String,
}

/// Raw outcome of one failed send attempt, before a delivery model maps
/// it onto [`ApiError`].
enum SendFailure {
    Build,
    Transport(reqwest::Error),
    Status { status: ResponseStatus, code: u16 },
    NoData,
    Decode(serde_json::Error),
}

/// Typed HTTP client bound to one base endpoint.
///
/// Holds the base endpoint (fixed at construction), the current bearer
/// token, and the transport session. Cheap to clone; clones share all
/// three. Concrete API clients construct one of these per backend and
/// feed it [`ApiRequest`] descriptors.
pub struct ApiClient<T = ReqwestTransport> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    base: String,
    token: RwLock<Option<String>>,
    transport: T,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ApiClient<ReqwestTransport> {
    /// Creates a client for `base` with no token and a fresh session.
    ///
    /// `base` is kept as given and parsed per send, so a malformed value
    /// surfaces as [`ApiError::InvalidUrl`] at send time rather than as a
    /// construction failure.
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_transport(base, ReqwestTransport::new())
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn with_transport(base: impl Into<String>, transport: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                base: base.into(),
                token: RwLock::new(None),
                transport,
            }),
        }
    }

    /// Replaces the bearer token. Applies to sends issued afterwards;
    /// in-flight sends keep the token they read at dispatch.
    pub fn set_token(&self, token: Option<String>) {
        *self.inner.token.write().expect("token lock poisoned") = token;
    }

    /// Reads the current token. Each send takes exactly one such read.
    pub fn token(&self) -> Option<String> {
        self.inner.token.read().expect("token lock poisoned").clone()
    }

    /// Builds the wire request for `request` against the base endpoint.
    ///
    /// The resolved URL is the base with the descriptor path appended to
    /// its path and the query items appended in the order given. Headers
    /// are applied in fixed precedence: content type and cache directive
    /// first, then the descriptor's headers (overwriting), then the
    /// bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base endpoint does not
    /// parse or a descriptor header is not representable on the wire.
    pub fn build_request<R: ApiRequest>(
        &self,
        request: &R,
        token: Option<&str>,
    ) -> Result<reqwest::Request, ApiError> {
        let url = self.build_url(request)?;
        debug!(url = %url, "built request");

        let mut wire = reqwest::Request::new(request.method().as_reqwest(), url);

        if let Some(body) = request.body() {
            *wire.body_mut() = Some(reqwest::Body::from(body));
        }

        let headers = wire.headers_mut();
        headers.insert(
            CONTENT_TYPE,
            request
                .content_type()
                .parse()
                .map_err(|_| ApiError::InvalidUrl)?,
        );

        if let Some(directive) = request.cache_policy().header_value() {
            headers.insert(CACHE_CONTROL, directive.parse().map_err(|_| ApiError::InvalidUrl)?);
        }

        for (name, value) in request.headers() {
            let name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| ApiError::InvalidUrl)?;
            let value = value.parse().map_err(|_| ApiError::InvalidUrl)?;
            headers.insert(name, value);
        }

        if let Some(token) = token {
            let bearer = format!("Bearer {token}")
                .parse()
                .map_err(|_| ApiError::InvalidUrl)?;
            headers.insert(AUTHORIZATION, bearer);
        }

        Ok(wire)
    }

    fn build_url<R: ApiRequest>(&self, request: &R) -> Result<Url, ApiError> {
        let mut url: Url = self.inner.base.parse().map_err(|_| ApiError::InvalidUrl)?;

        if let Some(path) = request.path() {
            // A host-only base parses with path "/"; appending to that
            // would double the separator.
            let merged = match url.path() {
                "/" => path,
                base => format!("{base}{path}"),
            };
            url.set_path(&merged);
        }

        let query = request.query_items();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// One send attempt shared by every delivery model: build the wire
    /// request, execute it, classify the status, read the body.
    async fn exchange<R: ApiRequest>(
        &self,
        request: &R,
        token: Option<&str>,
    ) -> Result<(ResponseStatus, Bytes), SendFailure> {
        let wire = self
            .build_request(request, token)
            .map_err(|_| SendFailure::Build)?;

        let response = self
            .inner
            .transport
            .execute(wire)
            .await
            .map_err(SendFailure::Transport)?;

        let code = response.status().as_u16();
        let status = ResponseStatus::from_code(code);
        let body = response.bytes().await.map_err(SendFailure::Transport)?;

        if !status.is_ok() {
            if !matches!(
                status,
                ResponseStatus::Unauthorized | ResponseStatus::NotFound
            ) {
                if let Ok(failed) = serde_json::from_slice::<FailureMessage>(&body) {
                    debug!(code, message = %failed.message, "server reported failure");
                }
            }
            return Err(SendFailure::Status { status, code });
        }

        if body.is_empty() {
            return Err(SendFailure::NoData);
        }

        Ok((status, body))
    }

    async fn perform<R: ApiRequest>(
        &self,
        request: &R,
        token: Option<&str>,
    ) -> Result<R::Response, SendFailure> {
        let (_, body) = self.exchange(request, token).await?;
        serde_json::from_slice(&body).map_err(SendFailure::Decode)
    }

    /// Sends `request` and decodes the response body into
    /// [`R::Response`](ApiRequest::Response).
    ///
    /// Lazy and cancellable: no I/O happens until the future is polled,
    /// and dropping it aborts the in-flight transport call without
    /// delivering anything. A missing token is not an error here — the
    /// request goes out unauthenticated and the server's own 401/403 is
    /// surfaced. The callback model makes the opposite choice; see
    /// [`send_with`](Self::send_with).
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let token = self.token();
        self.perform(request, token.as_deref())
            .await
            .map_err(pipeline_error)
    }

    /// Sends `request`, delivering the outcome to `on_result` exactly
    /// once.
    ///
    /// Requires a token: without one, `on_result` receives
    /// [`ApiError::Unauthorized`] before any network I/O, on the calling
    /// thread. Otherwise the send runs on a spawned task and `on_result`
    /// is invoked from that task. There is no cancellation — an issued
    /// send runs to completion or transport failure.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send_with<R, F>(&self, request: R, on_result: F)
    where
        R: ApiRequest + Send + Sync + 'static,
        R::Response: Send,
        F: FnOnce(Result<R::Response, ApiError>) + Send + 'static,
        T: 'static,
    {
        let Some(token) = self.token() else {
            on_result(Err(ApiError::Unauthorized));
            return;
        };

        let client = self.clone();
        tokio::spawn(async move {
            let result = client
                .perform(&request, Some(token.as_str()))
                .await
                .map_err(|failure| callback_error(failure, &request));
            on_result(result);
        });
    }

    /// Status-only variant of [`send_with`](Self::send_with): the success
    /// value is the classified status instead of a decoded body, for
    /// operations whose response payload the caller ignores.
    pub fn send_status_with<R, F>(&self, request: R, on_result: F)
    where
        R: ApiRequest + Send + Sync + 'static,
        F: FnOnce(Result<ResponseStatus, ApiError>) + Send + 'static,
        T: 'static,
    {
        let Some(token) = self.token() else {
            on_result(Err(ApiError::Unauthorized));
            return;
        };

        let client = self.clone();
        tokio::spawn(async move {
            let result = client
                .exchange(&request, Some(token.as_str()))
                .await
                .map(|(status, _)| status)
                .map_err(|failure| callback_error(failure, &request));
            on_result(result);
        });
    }
}

/// Maps a raw failure onto the error surface of the callback model.
fn callback_error<R: ApiRequest>(failure: SendFailure, request: &R) -> ApiError {
    match failure {
        SendFailure::Build => ApiError::InvalidUrl,
        SendFailure::Transport(source) => ApiError::Transport { source },
        SendFailure::Status {
            status: ResponseStatus::Unauthorized,
            ..
        } => ApiError::Unauthorized,
        SendFailure::Status {
            status: ResponseStatus::NotFound,
            ..
        } => ApiError::NotFound,
        SendFailure::Status { status, .. } => ApiError::Network {
            summary: RequestSummary::of(request),
            status,
            detail: request.failure_description(status),
        },
        SendFailure::NoData => ApiError::NoData,
        SendFailure::Decode(err) => ApiError::Decoding {
            reason: err.to_string(),
        },
    }
}

/// Maps a raw failure onto the error surface of the awaitable model.
fn pipeline_error(failure: SendFailure) -> ApiError {
    match failure {
        SendFailure::Build => ApiError::InvalidUrl,
        SendFailure::Transport(source) => ApiError::Transport { source },
        SendFailure::Status { status, code } => status_error(status, code),
        SendFailure::NoData => ApiError::NoData,
        SendFailure::Decode(err) => ApiError::Decoding {
            reason: err.to_string(),
        },
    }
}

fn status_error(status: ResponseStatus, code: u16) -> ApiError {
    match status {
        ResponseStatus::BadRequest => ApiError::BadRequest,
        ResponseStatus::Unauthorized => ApiError::Unauthorized,
        ResponseStatus::Forbidden => ApiError::Forbidden,
        ResponseStatus::NotFound => ApiError::NotFound,
        ResponseStatus::InternalServer => ApiError::ServerError,
        ResponseStatus::BadGateway
        | ResponseStatus::ServiceUnavailable
        | ResponseStatus::GatewayTimeout => ApiError::Server5xx { code },
        ResponseStatus::Unhandled => match code {
            402 | 405..=499 => ApiError::Client4xx { code },
            501..=599 => ApiError::Server5xx { code },
            _ => ApiError::Unknown,
        },
        // exchange only reports non-ok statuses
        ResponseStatus::Ok => ApiError::Unknown,
    }
}
