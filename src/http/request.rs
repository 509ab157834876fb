//! Request identification and owner extraction.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) and echo it on the response
//! - Extract the caller-supplied owner from the `x-userid` header
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Header names are case-insensitive; the owner value is used verbatim

use axum::http::{HeaderMap, HeaderName};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Header carrying the request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Header carrying the owner identifier.
pub const X_USER_ID: &str = "x-userid";

/// Layer assigning a UUID to requests that arrive without one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer copying the request id onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// First `x-userid` value, if present and valid UTF-8.
pub fn owner_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(X_USER_ID).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_owner_header_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-userid"), HeaderValue::from_static("PatJan"));
        assert_eq!(owner_header(&headers), Some("PatJan"));

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"X-UserId").unwrap(),
            HeaderValue::from_static("PatJan"),
        );
        assert_eq!(owner_header(&headers), Some("PatJan"));
    }

    #[test]
    fn test_owner_header_first_value_wins() {
        let mut headers = HeaderMap::new();
        headers.append(X_USER_ID, HeaderValue::from_static("first"));
        headers.append(X_USER_ID, HeaderValue::from_static("second"));
        assert_eq!(owner_header(&headers), Some("first"));
    }

    #[test]
    fn test_owner_header_missing_or_opaque() {
        assert_eq!(owner_header(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(X_USER_ID, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        assert_eq!(owner_header(&headers), None);
    }
}
