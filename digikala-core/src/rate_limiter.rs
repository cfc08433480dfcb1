//! Client-side rate limiting.
//!
//! Admission control in front of the transport: a token bucket grants a fixed
//! number of requests per 60-second window, suspending callers (never failing
//! them) once the window's quota is spent. Tokens replenish in bulk when the
//! window rolls over.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Length of the admission window.
const WINDOW: Duration = Duration::from_secs(60);

/// Floor for sleep intervals while waiting on a token, to avoid busy-looping
/// when the window boundary races with the acquire path.
const MIN_WAIT: Duration = Duration::from_millis(10);

/// Admission control applied before each outgoing request.
///
/// Implementations must be cheap to share across tasks and must never fail:
/// a saturated limiter delays the caller instead of erroring.
#[async_trait]
pub trait RateLimiter: Send + Sync + fmt::Debug {
    /// Suspends the caller until a request slot is available.
    async fn acquire(&self);

    /// Attempts non-blocking admission.
    ///
    /// Returns `true` and consumes a slot if one is available, `false`
    /// otherwise without waiting.
    async fn try_acquire(&self) -> bool;
}

#[derive(Debug)]
struct BucketState {
    tokens: u32,
    quota: u32,
    window: Duration,
    window_start: Instant,
}

impl BucketState {
    /// Resets the bucket if the current window has elapsed.
    fn refill(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.window_start) >= self.window {
            self.tokens = self.quota;
            self.window_start = now;
        }
    }

    fn try_consume(&mut self) -> bool {
        if self.tokens > 0 {
            self.tokens -= 1;
            true
        } else {
            false
        }
    }

    /// Time until the next window opens. Zero if a token is available now.
    fn wait_time(&self) -> Duration {
        if self.tokens > 0 {
            Duration::ZERO
        } else {
            (self.window_start + self.window).saturating_duration_since(Instant::now())
        }
    }
}

/// Token bucket limiter over a fixed 60-second window.
///
/// The full quota is available at the start of each window; requests beyond
/// it wait for the next window. Cloning is cheap and all clones share the
/// same bucket.
#[derive(Debug, Clone)]
pub struct TokenBucketLimiter {
    state: Arc<Mutex<BucketState>>,
}

impl TokenBucketLimiter {
    /// Creates a limiter granting `requests_per_minute` admissions per
    /// 60-second window.
    pub fn new(requests_per_minute: u32) -> Self {
        Self::with_window(requests_per_minute, WINDOW)
    }

    /// Creates a limiter with a custom window length.
    pub fn with_window(quota: u32, window: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(BucketState {
                tokens: quota,
                quota,
                window,
                window_start: Instant::now(),
            })),
        }
    }

    /// Number of admissions left in the current window.
    pub async fn available_tokens(&self) -> u32 {
        let mut state = self.state.lock().await;
        state.refill();
        state.tokens
    }
}

#[async_trait]
impl RateLimiter for TokenBucketLimiter {
    async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                state.refill();
                if state.try_consume() {
                    return;
                }
                state.wait_time()
            };
            let sleep_for = wait.max(MIN_WAIT);
            debug!(wait_ms = sleep_for.as_millis() as u64, "Rate limit window exhausted, waiting");
            tokio::time::sleep(sleep_for).await;
        }
    }

    async fn try_acquire(&self) -> bool {
        let mut state = self.state.lock().await;
        state.refill();
        state.try_consume()
    }
}

/// Pass-through limiter used when rate limiting is disabled
/// (`rate_limit_requests == 0`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRateLimiter;

#[async_trait]
impl RateLimiter for NoopRateLimiter {
    async fn acquire(&self) {}

    async fn try_acquire(&self) -> bool {
        true
    }
}
