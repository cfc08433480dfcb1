//! HTTP status mapping.

use crate::error::{Error, Result};
use crate::transport::HttpResponse;
use serde_json::Value;
use tracing::warn;

/// How much of an error body lands in the log line.
const BODY_PREVIEW_SIZE: usize = 200;

/// Maps a completed HTTP response to its raw JSON envelope or a classified
/// error.
///
/// Success-range statuses parse the body as JSON; a body that is not JSON
/// yields a validation error carrying the raw text. Error statuses extract
/// a message from the body's `message` key, falling back to the raw text,
/// falling back to `HTTP {code}`, and map to the status-specific error
/// kind with the parsed body and any `Retry-After` hint attached.
pub(super) fn map_response(response: &HttpResponse) -> Result<Value> {
    if response.is_success() {
        return match serde_json::from_slice(&response.body) {
            Ok(value) => Ok(value),
            Err(e) => Err(Error::validation_with_body(
                format!("Response body is not valid JSON: {e}"),
                Value::String(crate::error::truncate_message(
                    response.text().into_owned(),
                )),
            )),
        };
    }

    let parsed: Option<Value> = serde_json::from_slice(&response.body).ok();
    let message = parsed
        .as_ref()
        .and_then(|body| body.get("message"))
        .and_then(Value::as_str)
        .map(|message| crate::error::truncate_message(message.to_string()))
        .unwrap_or_else(|| {
            let text = response.text();
            let text = text.trim();
            if text.is_empty() {
                format!("HTTP {}", response.status)
            } else {
                crate::error::truncate_message(text.to_string())
            }
        });

    warn!(
        status = response.status,
        body_preview = %body_preview(response),
        "API returned error status"
    );

    Err(Error::from_status(
        response.status,
        message,
        parsed,
        response.retry_after_hint(),
    ))
}

fn body_preview(response: &HttpResponse) -> String {
    let text = response.text();
    if text.len() <= BODY_PREVIEW_SIZE {
        return text.into_owned();
    }
    let mut cut = BODY_PREVIEW_SIZE;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text[..cut].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, HashMap::new(), body.as_bytes().to_vec())
    }

    fn response_with_header(status: u16, body: &str, name: &str, value: &str) -> HttpResponse {
        let headers = [(name.to_string(), value.to_string())].into_iter().collect();
        HttpResponse::new(status, headers, body.as_bytes().to_vec())
    }

    #[test]
    fn test_success_returns_parsed_envelope() {
        let value = map_response(&response(200, r#"{"status": 200, "data": {"id": 1}}"#)).unwrap();
        assert_eq!(value, json!({"status": 200, "data": {"id": 1}}));
    }

    #[test]
    fn test_success_with_non_json_body_is_validation_error() {
        let err = map_response(&response(200, "<html>upstream proxy</html>")).unwrap_err();
        let message = err.as_validation().expect("validation error");
        assert!(message.contains("not valid JSON"));
        assert_eq!(
            err.response_body(),
            Some(&Value::String("<html>upstream proxy</html>".to_string()))
        );
    }

    #[test]
    fn test_error_message_extracted_from_body() {
        let err = map_response(&response(404, r#"{"message": "Product not found"}"#)).unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert!(err.to_string().contains("Product not found"));
        assert_eq!(
            err.response_body(),
            Some(&json!({"message": "Product not found"}))
        );
    }

    #[test]
    fn test_error_message_falls_back_to_raw_text() {
        let err = map_response(&response(500, "upstream exploded")).unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[test]
    fn test_error_message_falls_back_to_http_code() {
        let err = map_response(&response(502, "")).unwrap_err();
        assert!(err.to_string().contains("HTTP 502"));

        let err = map_response(&response(503, "   ")).unwrap_err();
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn test_non_string_message_key_falls_back() {
        let err = map_response(&response(400, r#"{"message": {"code": 7}}"#)).unwrap_err();
        assert_eq!(err.status_code(), Some(400));
        // Falls back to the raw text, not a crash or an empty message.
        assert!(err.to_string().contains("code"));
    }

    #[test]
    fn test_429_attaches_retry_after_hint() {
        let err = map_response(&response_with_header(
            429,
            r#"{"message": "Rate Limit Exceeded"}"#,
            "Retry-After",
            "12",
        ))
        .unwrap_err();
        let (message, retry_after) = err.as_rate_limit().expect("rate-limit error");
        assert_eq!(message, "Rate Limit Exceeded");
        assert_eq!(retry_after, Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_429_without_header_has_no_hint() {
        let err = map_response(&response(429, r#"{"message": "slow down"}"#)).unwrap_err();
        assert_eq!(err.as_rate_limit().expect("rate-limit error").1, None);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_retry_after_on_other_statuses_is_ignored() {
        let err =
            map_response(&response_with_header(503, "", "Retry-After", "9")).unwrap_err();
        assert_eq!(err.retry_after(), None);
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn test_status_variants() {
        assert!(map_response(&response(400, "{}"))
            .unwrap_err()
            .to_string()
            .starts_with("[400]"));
        assert_eq!(
            map_response(&response(401, "{}")).unwrap_err().status_code(),
            Some(401)
        );
        assert_eq!(
            map_response(&response(403, "{}")).unwrap_err().status_code(),
            Some(403)
        );
        let server = map_response(&response(500, "{}")).unwrap_err();
        assert!(server.is_retryable());
        let unmapped = map_response(&response(302, "{}")).unwrap_err();
        assert!(!unmapped.is_retryable());
        assert_eq!(unmapped.status_code(), Some(302));
    }

    #[test]
    fn test_oversized_error_message_is_truncated() {
        let long_message = "x".repeat(5000);
        let body = json!({"message": long_message}).to_string();
        let err = map_response(&response(400, &body)).unwrap_err();
        assert!(err.to_string().contains("... (truncated)"));
        assert!(err.to_string().len() < 1200);
    }

    #[test]
    fn test_body_preview_respects_char_boundaries() {
        let text = "é".repeat(BODY_PREVIEW_SIZE);
        let preview = body_preview(&response(500, &text));
        assert!(preview.len() <= BODY_PREVIEW_SIZE);
        assert!(!preview.is_empty());
    }
}
