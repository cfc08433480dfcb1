//! # Digikala Core Library
//!
//! Core resilience layer for the Digikala storefront API, providing the
//! shared infrastructure every endpoint client is built on: request
//! validation, client-side rate limiting, response caching, circuit
//! breaking, retry with exponential backoff, and a typed error taxonomy,
//! all composed into a single request pipeline.
//!
//! ## Features
//!
//! - **Type Safety**: Strongly typed response envelopes and a structured
//!   error hierarchy instead of stringly-typed failures
//! - **Resilience**: Circuit breaker, retry with backoff and server hints,
//!   and fixed-window rate limiting out of the box
//! - **Async First**: Built on tokio and reqwest, every I/O path is async
//! - **Pluggable**: Transport, cache, validator, rate limiter, and circuit
//!   breaker are all trait objects that can be swapped in tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use digikala_core::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let config = ClientConfig::builder()
//!     .rate_limit_requests(60)
//!     .max_retries(3)
//!     .build()?;
//!
//! let pipeline = RequestPipeline::new(config)?;
//! let response: ApiResponse<serde_json::Value> =
//!     pipeline.get("/v2/product/123/", None).await?;
//! println!("status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
//
// ============================================================================
// Pedantic lints we deliberately allow, each with a reason.
// ============================================================================
//
// module_name_repetitions: `cache::CacheConfig`, `retry::RetryConfig` and
//   friends read better at the call site than artificially shortened names.
#![allow(clippy::module_name_repetitions)]
// missing_errors_doc / missing_panics_doc: error conditions are documented
//   on the error types themselves rather than repeated on every signature.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
// must_use_candidate: blanket #[must_use] on every getter adds noise without
//   catching real bugs.
#![allow(clippy::must_use_candidate)]
// doc_markdown: flags product names like Digikala that are not code items.
#![allow(clippy::doc_markdown)]
// cast_precision_loss / cast_possible_truncation / cast_sign_loss: backoff
//   delay math converts between Duration millis and f64; the values involved
//   are far below any lossy range and are clamped afterwards.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// struct_excessive_bools: logging output toggles are naturally independent
//   booleans, not a state machine.
#![allow(clippy::struct_excessive_bools)]
// return_self_not_must_use: builder setters are always chained into build().
#![allow(clippy::return_self_not_must_use)]

// Re-export commonly used external dependencies so downstream crates can
// stay version-aligned without declaring them directly.
pub use serde;
pub use serde_json;

pub mod cache;
pub mod circuit_breaker;
pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod rate_limiter;
pub mod retry;
pub mod transport;
pub mod validator;

// Convenience re-exports of the types nearly every consumer touches.
pub use cache::{MemoryCache, ResponseCache, cache_key};
pub use circuit_breaker::{
    CircuitBreaker, CircuitBreakerConfig, CircuitState, DefaultCircuitBreaker, NoopCircuitBreaker,
};
pub use config::{CacheBackend, CacheConfig, ClientConfig, ClientConfigBuilder};
pub use credentials::{Credential, SecretString};
pub use envelope::ApiResponse;
pub use error::{ContextExt, Error, Result};
pub use pipeline::{PipelineBuilder, RequestPipeline};
pub use rate_limiter::{NoopRateLimiter, RateLimiter, TokenBucketLimiter};
pub use retry::{RetryConfig, RetryDecision, RetryStrategy};
pub use transport::{HttpMethod, HttpResponse, ReqwestTransport, Transport};
pub use validator::{DefaultValidator, RequestValidator};

/// Commonly used types, importable in one line.
///
/// ```rust
/// use digikala_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cache::{MemoryCache, ResponseCache};
    pub use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
    pub use crate::config::{CacheConfig, ClientConfig, ClientConfigBuilder};
    pub use crate::credentials::Credential;
    pub use crate::envelope::ApiResponse;
    pub use crate::error::{ContextExt, Error, Result};
    pub use crate::pipeline::{PipelineBuilder, RequestPipeline};
    pub use crate::rate_limiter::RateLimiter;
    pub use crate::retry::RetryConfig;
    pub use crate::transport::{HttpMethod, HttpResponse, Transport};
    pub use crate::validator::RequestValidator;
}

/// Version of the digikala-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the library
pub const NAME: &str = env!("CARGO_PKG_NAME");
