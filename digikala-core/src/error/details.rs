//! Error detail structures for the status-carrying error variants.

use std::time::Duration;

use serde_json::Value;

/// Details shared by the status-specific API error variants.
///
/// Extracted to a separate struct and boxed to keep the `Error` enum size
/// small.
///
/// # Example
///
/// ```rust
/// use digikala_core::error::ApiErrorDetails;
///
/// let details = ApiErrorDetails::new("Not Found - Resource does not exist", Some(404));
/// assert_eq!(details.status, Some(404));
/// assert_eq!(details.to_string(), "[404] Not Found - Resource does not exist");
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ApiErrorDetails {
    /// Descriptive message, extracted from the response when possible.
    pub message: String,
    /// HTTP or application-level status code, when one exists.
    pub status: Option<u16>,
    /// Raw response payload for diagnostics.
    pub body: Option<Value>,
}

impl ApiErrorDetails {
    /// Creates new details with the given message and status.
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
            body: None,
        }
    }

    /// Attaches the raw response payload.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl std::fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "[{status}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Details for rate-limit errors (status 429).
///
/// Carries the `Retry-After` hint separately from the generic status/body
/// payload so the retry engine can honor the server's exact wait request.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RateLimitDetails {
    /// Descriptive message.
    pub message: String,
    /// Server-provided wait hint, parsed from the `Retry-After` header or
    /// the envelope.
    pub retry_after: Option<Duration>,
    /// Status code; `Some(429)` unless constructed from an unusual source.
    pub status: Option<u16>,
    /// Raw response payload for diagnostics.
    pub body: Option<Value>,
}

impl RateLimitDetails {
    /// Creates new rate-limit details.
    pub fn new(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self {
            message: message.into(),
            retry_after,
            status: Some(429),
            body: None,
        }
    }

    /// Attaches the raw response payload.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl std::fmt::Display for RateLimitDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "[{status}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Details for validation errors.
///
/// Used both for request parameters that fail pre-flight checks and for
/// response bodies that fail schema validation; in the latter case the raw
/// body is kept for diagnostics.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ValidationDetails {
    /// What failed validation and why.
    pub message: String,
    /// The offending payload, when validation failed on a response body.
    pub body: Option<Value>,
}

impl ValidationDetails {
    /// Creates new validation details.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            body: None,
        }
    }

    /// Attaches the offending payload.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl std::fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
