//! Request handling.
//!
//! # Responsibilities
//! - Attach a unique request ID (UUID v4) as early as possible
//! - Decode the `POST /messages` body
//!
//! # Design Decisions
//! - Bodies are decoded as JSON whatever the Content-Type says
//! - Unknown fields (including a client-supplied `id`) are ignored

use axum::http::HeaderMap;
use serde_json::{Map, Value};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::facade::FacadeError;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer generating an `x-request-id` for requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Layer copying the request's `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// The request ID set by [`set_request_id_layer`], for log correlation.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Decode a `POST /messages` body into the message text.
///
/// The body must be a JSON object. An absent or `null` `msg` decodes to the
/// empty string, which the facade rejects as missing.
pub fn parse_post_body(body: &[u8]) -> Result<String, FacadeError> {
    let object: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| FacadeError::InvalidBody(e.to_string()))?;

    match object.get("msg") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(msg)) => Ok(msg.clone()),
        Some(other) => Err(FacadeError::InvalidBody(format!(
            "'msg' must be a string, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_parse_message() {
        assert_eq!(parse_post_body(br#"{"msg":"hello"}"#).unwrap(), "hello");
    }

    #[test]
    fn test_missing_or_null_msg_is_empty() {
        assert_eq!(parse_post_body(b"{}").unwrap(), "");
        assert_eq!(parse_post_body(br#"{"msg":null}"#).unwrap(), "");
    }

    #[test]
    fn test_client_id_ignored() {
        assert_eq!(
            parse_post_body(br#"{"id":"mine","msg":"hello"}"#).unwrap(),
            "hello"
        );
    }

    #[test]
    fn test_malformed_body_rejected() {
        for body in [
            &b""[..],
            b"not json",
            b"[1,2]",
            br#"["hello"]"#,
            b"[]",
            b"\"hello\"",
            br#"{"msg":42}"#,
            br#"{"msg":["hello"]}"#,
        ] {
            let err = parse_post_body(body).unwrap_err();
            assert!(matches!(err, FacadeError::InvalidBody(_)), "body {body:?}");
        }
    }

    #[test]
    fn test_request_id_lookup() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");

        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc"));
        assert_eq!(request_id(&headers), "abc");
    }
}
