//! Request descriptor contract.
//!
//! A descriptor is an inert description of one HTTP operation: method,
//! path, headers, body, query string, and the type a successful response
//! body decodes into. Concrete API clients define one descriptor type per
//! backend operation and hand it to [`ApiClient`](crate::ApiClient).

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::status::ResponseStatus;

/// HTTP method of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Cache directive forwarded onto the built request.
///
/// Pass-through only: `ProtocolDefault` adds nothing, the other variants
/// set the request's `Cache-Control` header. The crate performs no caching
/// of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    #[default]
    ProtocolDefault,
    NoCache,
    NoStore,
}

impl CachePolicy {
    pub(crate) fn header_value(self) -> Option<&'static str> {
        match self {
            CachePolicy::ProtocolDefault => None,
            CachePolicy::NoCache => Some("no-cache"),
            CachePolicy::NoStore => Some("no-store"),
        }
    }
}

/// Declarative description of one HTTP operation.
///
/// Only the [`Response`](ApiRequest::Response) type is required; every
/// other item defaults to the most common case (GET, no path, no body,
/// JSON content type). Descriptors are read-only to the client: each send
/// queries them, builds a wire request, and leaves them untouched.
pub trait ApiRequest {
    /// The type a successful response body decodes into.
    type Response: DeserializeOwned;

    fn method(&self) -> Method {
        Method::Get
    }

    /// Path appended verbatim to the base endpoint's path.
    fn path(&self) -> Option<String> {
        None
    }

    /// Extra headers. Each overwrites any header the builder already set
    /// under the same name.
    fn headers(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Raw body bytes, sent verbatim.
    fn body(&self) -> Option<Bytes> {
        None
    }

    fn content_type(&self) -> &str {
        "application/json"
    }

    /// Query pairs, appended to the URL in the order given.
    fn query_items(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn cache_policy(&self) -> CachePolicy {
        CachePolicy::default()
    }

    /// Optional human-readable description for an unexpected status,
    /// carried in [`ApiError::Network`](crate::ApiError::Network).
    fn failure_description(&self, _status: ResponseStatus) -> Option<String> {
        None
    }
}

/// Owned snapshot of a descriptor, small enough to ride inside an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub method: Method,
    pub path: Option<String>,
    pub query_items: Vec<(String, String)>,
}

impl RequestSummary {
    pub fn of<R: ApiRequest>(request: &R) -> Self {
        Self {
            method: request.method(),
            path: request.path(),
            query_items: request.query_items(),
        }
    }
}

impl fmt::Display for RequestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path.as_deref().unwrap_or("/"))?;
        for (i, (name, value)) in self.query_items.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}
