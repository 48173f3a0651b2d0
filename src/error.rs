//! Error taxonomy for dispatched requests.
//!
//! Every failure a send can produce lands in [`ApiError`]. Faults are
//! terminal for the send that produced them; retry and backoff policy
//! belong to the embedding application.

use thiserror::Error;

use crate::request::RequestSummary;
use crate::status::ResponseStatus;

/// Errors surfaced by [`ApiClient`](crate::ApiClient) sends.
///
/// Both delivery models share this enum; each surfaces only its own
/// subset. The callback model wraps unexpected statuses in
/// [`Network`](ApiError::Network), while the awaitable model splits them
/// into the per-status variants.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base endpoint or descriptor could not be turned into a wire
    /// request. A configuration error, not a runtime one.
    #[error("invalid base endpoint")]
    InvalidUrl,

    /// No token before dispatch (callback model), or the server answered
    /// with 401.
    #[error("unauthorized")]
    Unauthorized,

    /// HTTP 403.
    #[error("forbidden")]
    Forbidden,

    /// HTTP 404.
    #[error("not found")]
    NotFound,

    /// HTTP 400.
    #[error("bad request")]
    BadRequest,

    /// HTTP 500.
    #[error("server error")]
    ServerError,

    /// Any other 5xx, code preserved.
    #[error("server error {code}")]
    Server5xx { code: u16 },

    /// HTTP 402 or 405..=499, code preserved.
    #[error("client error {code}")]
    Client4xx { code: u16 },

    /// Callback-model wrapper for any remaining non-ok status, carrying a
    /// snapshot of the originating request for diagnostics. `detail` is
    /// the descriptor's own description of the failure, when it has one.
    #[error("request {summary} failed with status {status}")]
    Network {
        summary: RequestSummary,
        status: ResponseStatus,
        detail: Option<String>,
    },

    /// 2xx response with an absent body.
    #[error("empty response body")]
    NoData,

    /// Body present but it does not match the declared response type.
    /// `reason` is the decoder's diagnostic; raw bytes are never carried.
    #[error("decoding failed: {reason}")]
    Decoding { reason: String },

    /// Transport-level fault: DNS, timeout, connection reset. The
    /// underlying error is preserved as the source.
    #[error("transport failure")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// A fault the status mapping could not place anywhere else.
    #[error("unknown error")]
    Unknown,
}
