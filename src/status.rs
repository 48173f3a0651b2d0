//! HTTP status classification.

use std::fmt;

/// Classified HTTP response status.
///
/// Any code in `200..300` classifies as [`Ok`](ResponseStatus::Ok); the
/// named variants cover the statuses the dispatch treats specially;
/// everything else is [`Unhandled`](ResponseStatus::Unhandled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    Ok,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalServer,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    Unhandled,
}

impl ResponseStatus {
    /// Classifies a raw status code. Total over `u16`: codes without a
    /// named variant map to `Unhandled`.
    pub fn from_code(code: u16) -> Self {
        match code {
            200..300 => ResponseStatus::Ok,
            400 => ResponseStatus::BadRequest,
            401 => ResponseStatus::Unauthorized,
            403 => ResponseStatus::Forbidden,
            404 => ResponseStatus::NotFound,
            500 => ResponseStatus::InternalServer,
            502 => ResponseStatus::BadGateway,
            503 => ResponseStatus::ServiceUnavailable,
            504 => ResponseStatus::GatewayTimeout,
            _ => ResponseStatus::Unhandled,
        }
    }

    pub fn is_ok(self) -> bool {
        matches!(self, ResponseStatus::Ok)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseStatus::Ok => "ok",
            ResponseStatus::BadRequest => "bad request",
            ResponseStatus::Unauthorized => "unauthorized",
            ResponseStatus::Forbidden => "forbidden",
            ResponseStatus::NotFound => "not found",
            ResponseStatus::InternalServer => "internal server error",
            ResponseStatus::BadGateway => "bad gateway",
            ResponseStatus::ServiceUnavailable => "service unavailable",
            ResponseStatus::GatewayTimeout => "gateway timeout",
            ResponseStatus::Unhandled => "unhandled",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range_is_ok() {
        assert_eq!(ResponseStatus::from_code(200), ResponseStatus::Ok);
        assert_eq!(ResponseStatus::from_code(201), ResponseStatus::Ok);
        assert_eq!(ResponseStatus::from_code(204), ResponseStatus::Ok);
        assert_eq!(ResponseStatus::from_code(299), ResponseStatus::Ok);
    }

    #[test]
    fn test_success_range_boundaries_are_exclusive() {
        assert_eq!(ResponseStatus::from_code(199), ResponseStatus::Unhandled);
        assert_eq!(ResponseStatus::from_code(300), ResponseStatus::Unhandled);
    }

    #[test]
    fn test_named_codes_map_to_their_variant() {
        assert_eq!(ResponseStatus::from_code(400), ResponseStatus::BadRequest);
        assert_eq!(ResponseStatus::from_code(401), ResponseStatus::Unauthorized);
        assert_eq!(ResponseStatus::from_code(403), ResponseStatus::Forbidden);
        assert_eq!(ResponseStatus::from_code(404), ResponseStatus::NotFound);
        assert_eq!(ResponseStatus::from_code(500), ResponseStatus::InternalServer);
        assert_eq!(ResponseStatus::from_code(502), ResponseStatus::BadGateway);
        assert_eq!(
            ResponseStatus::from_code(503),
            ResponseStatus::ServiceUnavailable
        );
        assert_eq!(ResponseStatus::from_code(504), ResponseStatus::GatewayTimeout);
    }

    #[test]
    fn test_unrecognized_codes_are_unhandled() {
        assert_eq!(ResponseStatus::from_code(418), ResponseStatus::Unhandled);
        assert_eq!(ResponseStatus::from_code(0), ResponseStatus::Unhandled);
        assert_eq!(ResponseStatus::from_code(302), ResponseStatus::Unhandled);
        assert_eq!(ResponseStatus::from_code(599), ResponseStatus::Unhandled);
    }

    #[test]
    fn test_is_ok() {
        assert!(ResponseStatus::from_code(200).is_ok());
        assert!(!ResponseStatus::from_code(404).is_ok());
    }
}
