//! The request pipeline.
//!
//! [`RequestPipeline`] sequences every safeguard around a network call:
//!
//! ```text
//! validate -> rate limit -> cache lookup (GET) -> retry loop -> cache write
//!                                                    |
//!                                 breaker gate -> transport -> status map
//!                                                    -> envelope unwrap
//! ```
//!
//! Each stage is a capability trait ([`Transport`](crate::transport::Transport),
//! [`ResponseCache`](crate::cache::ResponseCache),
//! [`RateLimiter`](crate::rate_limiter::RateLimiter),
//! [`CircuitBreaker`](crate::circuit_breaker::CircuitBreaker),
//! [`RequestValidator`](crate::validator::RequestValidator)) injected at
//! construction through [`PipelineBuilder`], so any of them can be swapped
//! without touching the orchestration.

mod builder;
mod request;
mod response;

pub use builder::{PipelineBuilder, RequestPipeline};
