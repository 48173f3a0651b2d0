//! Typed HTTP client core.
//!
//! Concrete API clients describe each backend operation as an
//! [`ApiRequest`] descriptor; [`ApiClient`] builds the wire request,
//! dispatches it on the transport, classifies the outcome into the
//! [`ApiError`] taxonomy, and decodes successful bodies into the
//! descriptor's declared response type.

pub mod client;
pub mod error;
pub mod request;
pub mod status;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use request::{ApiRequest, CachePolicy, Method, RequestSummary};
pub use status::ResponseStatus;
pub use transport::{HttpTransport, ReqwestTransport};
