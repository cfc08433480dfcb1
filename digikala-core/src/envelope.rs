//! Typed response envelope.
//!
//! Every Digikala endpoint wraps its payload in `{"status": <code>,
//! "data": {...}}`, where `status` is an application-level code that can
//! disagree with the HTTP status line. [`ApiResponse::from_value`] checks
//! the envelope before touching the payload, so a non-200 envelope maps to
//! the right error even when `data` would never deserialize.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A successfully unwrapped API response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    /// Application-level status code; always 200 for a value produced by
    /// [`ApiResponse::from_value`].
    pub status: u16,
    /// The typed payload from the envelope's `data` field.
    pub data: T,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Unwraps a raw response body into a typed envelope.
    ///
    /// Two-phase: the `status` field is examined first, and only a literal
    /// 200 proceeds to deserializing `data`. A missing `data` field
    /// deserializes as JSON `null`, which succeeds for optional payload
    /// types.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] when `status` is missing or not an integer,
    ///   carrying the raw body.
    /// - The status-mapped error ([`Error::NotFound`], [`Error::RateLimit`],
    ///   ...) with its canonical message when `status` is not 200.
    /// - [`Error::Validation`] when `data` does not match `T`, carrying the
    ///   raw body.
    pub fn from_value(body: Value) -> Result<Self> {
        let status = match body.get("status").and_then(Value::as_u64) {
            Some(status) => match u16::try_from(status) {
                Ok(status) => status,
                Err(_) => {
                    return Err(Error::validation_with_body(
                        format!("Response envelope status {status} is out of range"),
                        body,
                    ));
                }
            },
            None => {
                return Err(Error::validation_with_body(
                    "Response envelope is missing an integer 'status' field",
                    body,
                ));
            }
        };

        if status != 200 {
            return Err(Error::from_api_status(status, Some(body)));
        }

        let data = body.get("data").unwrap_or(&Value::Null);
        match T::deserialize(data) {
            Ok(data) => Ok(Self { status, data }),
            Err(e) => Err(Error::validation_with_body(
                format!("Response data failed schema validation: {e}"),
                body,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Product {
        id: u64,
        title: String,
    }

    #[test]
    fn test_success_envelope_parses_typed_data() {
        let body = json!({"status": 200, "data": {"id": 42, "title": "Laptop"}});
        let response = ApiResponse::<Product>::from_value(body).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            response.data,
            Product {
                id: 42,
                title: "Laptop".to_string()
            }
        );
    }

    #[test]
    fn test_non_200_status_wins_over_unparseable_data() {
        // data would never deserialize into Product, but the envelope
        // status must be mapped before data is examined.
        let body = json!({"status": 404, "data": "gone"});
        let err = ApiResponse::<Product>::from_value(body).unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert!(err.to_string().contains("Not Found - Resource does not exist"));
        assert_eq!(err.response_body(), Some(&json!({"status": 404, "data": "gone"})));
    }

    #[test]
    fn test_status_429_maps_to_rate_limit() {
        let body = json!({"status": 429, "data": null});
        let err = ApiResponse::<Value>::from_value(body).unwrap_err();
        let (message, retry_after) = err.as_rate_limit().expect("rate-limit error");
        assert_eq!(message, "Rate Limit Exceeded");
        assert_eq!(retry_after, None);
    }

    #[test]
    fn test_status_5xx_maps_to_server_error() {
        let body = json!({"status": 503, "data": null});
        let err = ApiResponse::<Value>::from_value(body).unwrap_err();
        assert_eq!(err.status_code(), Some(503));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_unmapped_status_uses_generic_message() {
        let body = json!({"status": 418, "data": null});
        let err = ApiResponse::<Value>::from_value(body).unwrap_err();
        assert_eq!(err.status_code(), Some(418));
        assert!(err.to_string().contains("Request failed with status 418"));
    }

    #[test]
    fn test_missing_status_is_a_validation_error() {
        let body = json!({"data": {"id": 1}});
        let err = ApiResponse::<Value>::from_value(body).unwrap_err();
        assert!(err.as_validation().is_some());
        assert!(err.response_body().is_some());
    }

    #[test]
    fn test_non_integer_status_is_a_validation_error() {
        for status in [json!("ok"), json!(2.5), json!(null), json!(-1)] {
            let body = json!({"status": status, "data": {}});
            let err = ApiResponse::<Value>::from_value(body).unwrap_err();
            assert!(err.as_validation().is_some(), "status {status:?}");
        }
    }

    #[test]
    fn test_out_of_range_status_is_a_validation_error() {
        let body = json!({"status": 99_999, "data": {}});
        let err = ApiResponse::<Value>::from_value(body).unwrap_err();
        assert!(err.as_validation().is_some());
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_data_schema_mismatch_is_a_validation_error() {
        let body = json!({"status": 200, "data": {"id": "not-a-number"}});
        let err = ApiResponse::<Product>::from_value(body).unwrap_err();
        let message = err.as_validation().expect("validation error");
        assert!(message.contains("schema validation"));
        assert!(err.response_body().is_some());
    }

    #[test]
    fn test_missing_data_deserializes_as_null() {
        let body = json!({"status": 200});
        let response = ApiResponse::<Value>::from_value(body).unwrap();
        assert_eq!(response.data, Value::Null);

        let body = json!({"status": 200});
        let response = ApiResponse::<Option<Product>>::from_value(body).unwrap();
        assert_eq!(response.data, None);
    }

    #[test]
    fn test_extra_envelope_fields_are_ignored() {
        let body = json!({
            "status": 200,
            "data": {"id": 7, "title": "Phone"},
            "server_time": "2026-08-25T10:00:00Z"
        });
        let response = ApiResponse::<Product>::from_value(body).unwrap();
        assert_eq!(response.data.id, 7);
    }

    #[test]
    fn test_works_with_map_payloads() {
        let body = json!({"status": 200, "data": {"a": 1, "b": 2}});
        let response = ApiResponse::<HashMap<String, u32>>::from_value(body).unwrap();
        assert_eq!(response.data["a"], 1);
        assert_eq!(response.data["b"], 2);
    }
}
