//! # Error Handling for the Digikala Client
//!
//! A structured error taxonomy for everything that can go wrong between the
//! caller and the Digikala storefront API, designed so that callers can tell
//! transient-and-already-retried conditions apart from permanent client
//! errors without string matching.
//!
//! ## Design Philosophy
//!
//! 1. **Type Safety**: Strongly-typed errors using `thiserror`
//! 2. **API Stability**: Public enums are `#[non_exhaustive]`
//! 3. **Zero Panic**: No `unwrap()` or `expect()` on recoverable paths
//! 4. **Context Rich**: Full error chain support with context attachment
//! 5. **Performance**: `Cow<'static, str>` messages and boxed large variants
//! 6. **Thread Safety**: All error types are `Send + Sync + 'static`
//!
//! ## Error Hierarchy
//!
//! ```text
//! Error (main error type)
//! ├── BadRequest    - HTTP/application status 400
//! ├── Unauthorized  - HTTP/application status 401
//! ├── Forbidden     - HTTP/application status 403
//! ├── NotFound      - HTTP/application status 404
//! ├── RateLimit     - HTTP/application status 429, carries Retry-After
//! ├── Server        - HTTP/application status 5xx
//! ├── Timeout       - transport deadline exceeded
//! ├── Connection    - transport unreachable
//! ├── Validation    - request pre-flight or response schema failure
//! ├── CircuitOpen   - breaker rejected the call fast
//! ├── Api           - anything else the API reports
//! ├── Config        - construction-time configuration failure
//! └── Context       - error with additional context
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use digikala_core::error::{Error, Result};
//!
//! fn lookup(product_id: u64) -> Result<()> {
//!     if product_id == 0 {
//!         return Err(Error::validation("product id must be positive"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Handling classified errors
//!
//! ```rust
//! use digikala_core::error::Error;
//!
//! fn handle(err: Error) {
//!     if err.is_retryable() {
//!         if let Some(delay) = err.retry_after() {
//!             println!("server asked us to wait {delay:?}");
//!         }
//!     }
//!     if let Some(status) = err.status_code() {
//!         println!("failed with status {status}");
//!     }
//! }
//! ```

mod config;
mod context;
mod convert;
mod details;

use std::borrow::Cow;
use std::error::Error as StdError;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

pub use config::{ConfigValidationError, ValidationResult};
pub use context::ContextExt;
pub use details::{ApiErrorDetails, RateLimitDetails, ValidationDetails};

pub(crate) use convert::truncate_message;

/// Result type alias for all client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error type for the Digikala client crates.
///
/// Design constraints:
/// - Large variants are boxed to keep the enum size ≤ 56 bytes
/// - Message-only variants use `Cow<'static, str>` for zero-allocation
///   static strings
///
/// # Example
///
/// ```rust
/// use digikala_core::error::Error;
///
/// let err = Error::not_found("Not Found - Resource does not exist");
/// assert_eq!(err.status_code(), Some(404));
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The API rejected the request as malformed (status 400).
    #[error("{0}")]
    BadRequest(Box<ApiErrorDetails>),

    /// The API rejected the credential (status 401).
    #[error("{0}")]
    Unauthorized(Box<ApiErrorDetails>),

    /// The credential is valid but lacks access (status 403).
    #[error("{0}")]
    Forbidden(Box<ApiErrorDetails>),

    /// The requested resource does not exist (status 404).
    #[error("{0}")]
    NotFound(Box<ApiErrorDetails>),

    /// The server throttled the request (status 429). Carries the parsed
    /// `Retry-After` hint when the server supplied one.
    #[error("{0}")]
    RateLimit(Box<RateLimitDetails>),

    /// The server failed (status 5xx).
    #[error("{0}")]
    Server(Box<ApiErrorDetails>),

    /// The transport deadline elapsed before a response arrived.
    #[error("Timeout: {0}")]
    Timeout(Cow<'static, str>),

    /// The transport could not reach the server.
    #[error("Connection failed: {0}")]
    Connection(Cow<'static, str>),

    /// Request parameters failed pre-flight checks, or a response body
    /// failed schema validation. Carries the offending payload when one
    /// exists.
    #[error("Validation error: {0}")]
    Validation(Box<ValidationDetails>),

    /// The circuit breaker rejected the call without touching the network.
    #[error(
        "Circuit breaker is open: {failure_count} consecutive failures, retry in {retry_after:?}"
    )]
    CircuitOpen {
        /// Consecutive failures observed when the breaker opened.
        failure_count: u32,
        /// Estimated wait until the breaker admits a trial call.
        retry_after: Duration,
    },

    /// Any other API failure, including unmapped status codes.
    #[error("{0}")]
    Api(Box<ApiErrorDetails>),

    /// Invalid configuration detected at construction time.
    #[error("Invalid configuration: {0}")]
    Config(Box<ConfigValidationError>),

    /// Error with additional context, preserving the error chain.
    #[error("{context}")]
    Context {
        /// Context message describing what operation failed.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    // ==================== Constructor Methods ====================

    /// Creates a bad-request error (status 400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(Box::new(ApiErrorDetails::new(message, Some(400))))
    }

    /// Creates an unauthorized error (status 401).
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(Box::new(ApiErrorDetails::new(message, Some(401))))
    }

    /// Creates a forbidden error (status 403).
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(Box::new(ApiErrorDetails::new(message, Some(403))))
    }

    /// Creates a not-found error (status 404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(Box::new(ApiErrorDetails::new(message, Some(404))))
    }

    /// Creates a rate-limit error (status 429) with an optional server
    /// supplied retry hint.
    ///
    /// # Example
    ///
    /// ```rust
    /// use digikala_core::error::Error;
    /// use std::time::Duration;
    ///
    /// let err = Error::rate_limit("Rate Limit Exceeded", Some(Duration::from_secs(30)));
    /// assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
    /// ```
    pub fn rate_limit(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self::RateLimit(Box::new(RateLimitDetails::new(message, retry_after)))
    }

    /// Creates a server error with the actual 5xx status.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server(Box::new(ApiErrorDetails::new(message, Some(status))))
    }

    /// Creates a timeout error.
    /// Accepts both `&'static str` (zero allocation) and `String`.
    pub fn timeout(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Creates a connection-failure error.
    /// Accepts both `&'static str` (zero allocation) and `String`.
    pub fn connection(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a validation error without an attached payload.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(Box::new(ValidationDetails::new(message)))
    }

    /// Creates a validation error carrying the offending payload for
    /// diagnostics.
    pub fn validation_with_body(message: impl Into<String>, body: Value) -> Self {
        Self::Validation(Box::new(ValidationDetails::new(message).with_body(body)))
    }

    /// Creates a circuit-open error.
    pub fn circuit_open(failure_count: u32, retry_after: Duration) -> Self {
        Self::CircuitOpen {
            failure_count,
            retry_after,
        }
    }

    /// Creates a generic API error without a status code.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(Box::new(ApiErrorDetails::new(message, None)))
    }

    /// Creates the status-specific error kind for a failed HTTP or
    /// application-level status.
    ///
    /// 400/401/403/404/429 and the 5xx range map to their dedicated
    /// variants; anything else becomes a generic [`Error::Api`]. The raw
    /// response payload rides along for diagnostics when available, and a
    /// parsed `Retry-After` hint is attached to rate-limit errors.
    #[must_use]
    pub fn from_status(
        status: u16,
        message: impl Into<String>,
        body: Option<Value>,
        retry_after: Option<Duration>,
    ) -> Self {
        let details = |message: String| {
            let mut d = ApiErrorDetails::new(message, Some(status));
            if let Some(body) = body.clone() {
                d = d.with_body(body);
            }
            Box::new(d)
        };
        let message = message.into();
        match status {
            400 => Self::BadRequest(details(message)),
            401 => Self::Unauthorized(details(message)),
            403 => Self::Forbidden(details(message)),
            404 => Self::NotFound(details(message)),
            429 => {
                let mut d = RateLimitDetails::new(message, retry_after);
                if let Some(body) = body {
                    d = d.with_body(body);
                }
                Self::RateLimit(Box::new(d))
            }
            500..=599 => Self::Server(details(message)),
            _ => Self::Api(details(message)),
        }
    }

    /// Creates the status-specific error for an application-level status
    /// field embedded in a response envelope, using the canonical message
    /// for that status.
    #[must_use]
    pub fn from_api_status(status: u16, body: Option<Value>) -> Self {
        Self::from_status(status, default_status_message(status), body, None)
    }

    // ==================== Context Methods ====================

    /// Attaches context to an existing error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use digikala_core::error::Error;
    ///
    /// let err = Error::connection("connection refused")
    ///     .context("failed to fetch product 12345");
    /// assert!(err.to_string().contains("product 12345"));
    /// ```
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    // ==================== Chain Traversal Methods ====================

    /// Internal helper: iterates the error chain, penetrating Context
    /// layers.
    fn iter_chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| match err {
            Error::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        })
    }

    /// Returns the root cause of the error, skipping Context layers.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        self.iter_chain().last().unwrap_or(self)
    }

    /// Finds a specific error variant in the chain (penetrates Context
    /// layers).
    pub fn find_variant<F>(&self, matcher: F) -> Option<&Error>
    where
        F: Fn(&Error) -> bool,
    {
        self.iter_chain().find(|e| matcher(e))
    }

    /// Generates a detailed error report with the full chain.
    #[must_use]
    pub fn report(&self) -> String {
        use std::fmt::Write;
        let mut report = String::new();
        report.push_str(&self.to_string());

        let mut current: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(err) = current {
            let _ = write!(report, "\nCaused by: {err}");
            current = err.source();
        }
        report
    }

    // ==================== Helper Methods (Context Penetrating) ====================

    /// Checks whether this error denotes a transient condition worth
    /// retrying (penetrates Context layers).
    ///
    /// Returns `true` for `Timeout`, `Connection`, `RateLimit`, and
    /// `Server`. The retry engine applies its own status-set policy on top
    /// of this.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Timeout(_)
            | Error::Connection(_)
            | Error::RateLimit(_)
            | Error::Server(_) => true,
            Error::Context { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// Returns the wait hint carried by rate-limit and circuit-open errors
    /// (penetrates Context layers).
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimit(details) => details.retry_after,
            Error::CircuitOpen { retry_after, .. } => Some(*retry_after),
            Error::Context { source, .. } => source.retry_after(),
            _ => None,
        }
    }

    /// Returns the HTTP or application-level status code associated with
    /// this error, if any (penetrates Context layers).
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::BadRequest(d)
            | Error::Unauthorized(d)
            | Error::Forbidden(d)
            | Error::NotFound(d)
            | Error::Server(d)
            | Error::Api(d) => d.status,
            Error::RateLimit(d) => d.status,
            Error::Context { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// Returns the raw response payload attached for diagnostics, if any
    /// (penetrates Context layers).
    #[must_use]
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            Error::BadRequest(d)
            | Error::Unauthorized(d)
            | Error::Forbidden(d)
            | Error::NotFound(d)
            | Error::Server(d)
            | Error::Api(d) => d.body.as_ref(),
            Error::RateLimit(d) => d.body.as_ref(),
            Error::Validation(d) => d.body.as_ref(),
            Error::Context { source, .. } => source.response_body(),
            _ => None,
        }
    }

    /// Checks if this is a rate-limit error (penetrates Context layers).
    /// Returns the message and the optional retry hint.
    #[must_use]
    pub fn as_rate_limit(&self) -> Option<(&str, Option<Duration>)> {
        match self {
            Error::RateLimit(d) => Some((d.message.as_str(), d.retry_after)),
            Error::Context { source, .. } => source.as_rate_limit(),
            _ => None,
        }
    }

    /// Checks if this is a circuit-open error (penetrates Context layers).
    /// Returns the failure count and the retry-after estimate.
    #[must_use]
    pub fn as_circuit_open(&self) -> Option<(u32, Duration)> {
        match self {
            Error::CircuitOpen {
                failure_count,
                retry_after,
            } => Some((*failure_count, *retry_after)),
            Error::Context { source, .. } => source.as_circuit_open(),
            _ => None,
        }
    }

    /// Checks if this is a validation error (penetrates Context layers).
    /// Returns the message.
    #[must_use]
    pub fn as_validation(&self) -> Option<&str> {
        match self {
            Error::Validation(d) => Some(d.message.as_str()),
            Error::Context { source, .. } => source.as_validation(),
            _ => None,
        }
    }
}

/// Canonical message for an application-level error status.
#[must_use]
pub fn default_status_message(status: u16) -> String {
    match status {
        400 => "Bad Request - Invalid parameters".to_string(),
        401 => "Unauthorized - Invalid or missing API key".to_string(),
        403 => "Forbidden - Access denied".to_string(),
        404 => "Not Found - Resource does not exist".to_string(),
        429 => "Rate Limit Exceeded".to_string(),
        500 => "Internal Server Error".to_string(),
        502 => "Bad Gateway".to_string(),
        503 => "Service Unavailable".to_string(),
        _ => format!("Request failed with status {status}"),
    }
}
