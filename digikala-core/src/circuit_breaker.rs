//! Circuit breaker for failing fast when the API is unhealthy.
//!
//! Tracks consecutive failures and short-circuits requests once a threshold
//! is reached, giving the upstream service room to recover instead of
//! hammering it with doomed calls.
//!
//! State machine:
//!
//! ```text
//!               failure_threshold reached
//!    CLOSED ---------------------------------> OPEN
//!      ^                                        |
//!      | success_threshold                      | recovery_timeout
//!      | trial successes                        | elapsed
//!      |                                        v
//!      +--------------- HALF-OPEN <-------------+
//!                           |
//!                           | any failure
//!                           v
//!                         OPEN
//! ```
//!
//! While OPEN, [`CircuitBreaker::allow_request`] rejects immediately with
//! [`Error::CircuitOpen`] carrying the estimated wait; no network, cache, or
//! retry resources are spent. A failed trial call in HALF-OPEN reopens the
//! breaker with the failure count pinned at the threshold, so the next
//! recovery attempt starts from a full window.

use crate::error::{ConfigValidationError, Error, Result};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Circuit breaker states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation, requests flow through.
    Closed,
    /// Failure threshold reached, requests are rejected fast.
    Open,
    /// Recovery timeout elapsed, trial requests probe the service.
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitState::Closed => write!(f, "closed"),
            CircuitState::Open => write!(f, "open"),
            CircuitState::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// Circuit breaker tuning knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit.
    pub failure_threshold: u32,
    /// How long the circuit stays open before admitting trial requests.
    pub recovery_timeout: Duration,
    /// Consecutive trial successes required to close the circuit again.
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(60),
            success_threshold: 2,
        }
    }
}

impl CircuitBreakerConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] if either threshold is zero or the
    /// recovery timeout is zero.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if self.failure_threshold == 0 {
            return Err(ConfigValidationError::too_low("failure_threshold", 0, 1));
        }
        if self.success_threshold == 0 {
            return Err(ConfigValidationError::too_low("success_threshold", 0, 1));
        }
        if self.recovery_timeout.is_zero() {
            return Err(ConfigValidationError::too_low(
                "recovery_timeout",
                "0s",
                "1 millisecond",
            ));
        }
        Ok(())
    }
}

/// Health gate consulted before every attempt and informed of every outcome.
///
/// `allow_request` is called once per attempt (including retries), so an
/// open breaker also cuts a retry sequence short.
pub trait CircuitBreaker: Send + Sync + fmt::Debug {
    /// Checks whether a request may proceed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CircuitOpen`] while the breaker is open and the
    /// recovery timeout has not elapsed.
    fn allow_request(&self) -> Result<()>;

    /// Records a successful attempt.
    fn record_success(&self);

    /// Records a failed attempt.
    fn record_failure(&self);

    /// Current state, without advancing time-based transitions.
    fn state(&self) -> CircuitState;

    /// Current consecutive failure count.
    fn failure_count(&self) -> u32;
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    failure_count: u32,
    success_count: u32,
    last_failure_at: Option<Instant>,
}

/// Threshold-based circuit breaker.
///
/// All state lives behind a single mutex; the critical sections are a few
/// comparisons, so contention is negligible next to the network calls the
/// breaker guards.
#[derive(Debug)]
pub struct DefaultCircuitBreaker {
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerInner>,
}

impl Default for DefaultCircuitBreaker {
    fn default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }
}

impl DefaultCircuitBreaker {
    /// Creates a breaker with the given configuration.
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failure_count: 0,
                success_count: 0,
                last_failure_at: None,
            }),
        }
    }

    /// Manually closes the circuit and clears all counters.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.state = CircuitState::Closed;
        inner.failure_count = 0;
        inner.success_count = 0;
        inner.last_failure_at = None;
        debug!("Circuit breaker manually reset");
    }

    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        // A poisoned lock only means another thread panicked mid-update;
        // the counters remain usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CircuitBreaker for DefaultCircuitBreaker {
    fn allow_request(&self) -> Result<()> {
        let mut inner = self.lock();
        if inner.state != CircuitState::Open {
            return Ok(());
        }

        let elapsed = inner
            .last_failure_at
            .map(|at| at.elapsed())
            .unwrap_or(self.config.recovery_timeout);
        if elapsed >= self.config.recovery_timeout {
            inner.state = CircuitState::HalfOpen;
            inner.success_count = 0;
            debug!("Circuit breaker half-open, admitting trial request");
            return Ok(());
        }

        Err(Error::circuit_open(
            inner.failure_count,
            self.config.recovery_timeout - elapsed,
        ))
    }

    fn record_success(&self) {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::HalfOpen => {
                inner.success_count += 1;
                if inner.success_count >= self.config.success_threshold {
                    inner.state = CircuitState::Closed;
                    inner.failure_count = 0;
                    inner.success_count = 0;
                    inner.last_failure_at = None;
                    debug!("Circuit breaker closed after successful trial requests");
                }
            }
            CircuitState::Closed => {
                inner.failure_count = 0;
            }
            // In-flight requests may still report after the circuit opened.
            CircuitState::Open => {}
        }
    }

    fn record_failure(&self) {
        let mut inner = self.lock();
        inner.failure_count += 1;
        inner.last_failure_at = Some(Instant::now());
        match inner.state {
            CircuitState::HalfOpen => {
                // A failed trial call reopens the breaker with the count
                // pinned at the threshold.
                inner.state = CircuitState::Open;
                inner.failure_count = self.config.failure_threshold;
                inner.success_count = 0;
                warn!("Circuit breaker reopened after failed trial request");
            }
            CircuitState::Closed if inner.failure_count >= self.config.failure_threshold => {
                inner.state = CircuitState::Open;
                warn!(
                    failure_count = inner.failure_count,
                    "Circuit breaker opened"
                );
            }
            _ => {}
        }
    }

    fn state(&self) -> CircuitState {
        self.lock().state
    }

    fn failure_count(&self) -> u32 {
        self.lock().failure_count
    }
}

/// Breaker that never opens, for callers that want raw pass-through.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCircuitBreaker;

impl CircuitBreaker for NoopCircuitBreaker {
    fn allow_request(&self) -> Result<()> {
        Ok(())
    }

    fn record_success(&self) {}

    fn record_failure(&self) {}

    fn state(&self) -> CircuitState {
        CircuitState::Closed
    }

    fn failure_count(&self) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn breaker(failure_threshold: u32, recovery_ms: u64, success_threshold: u32) -> DefaultCircuitBreaker {
        DefaultCircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold,
            recovery_timeout: Duration::from_millis(recovery_ms),
            success_threshold,
        })
    }

    #[test]
    fn test_config_defaults() {
        let config = CircuitBreakerConfig::default();
        assert_eq!(config.failure_threshold, 5);
        assert_eq!(config.recovery_timeout, Duration::from_secs(60));
        assert_eq!(config.success_threshold, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_thresholds() {
        let mut config = CircuitBreakerConfig::default();
        config.failure_threshold = 0;
        assert_eq!(
            config.validate().unwrap_err().field_name(),
            "failure_threshold"
        );

        let mut config = CircuitBreakerConfig::default();
        config.success_threshold = 0;
        assert_eq!(
            config.validate().unwrap_err().field_name(),
            "success_threshold"
        );

        let mut config = CircuitBreakerConfig::default();
        config.recovery_timeout = Duration::ZERO;
        assert_eq!(
            config.validate().unwrap_err().field_name(),
            "recovery_timeout"
        );
    }

    #[test]
    fn test_starts_closed_and_allows() {
        let breaker = DefaultCircuitBreaker::default();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 0);
        assert!(breaker.allow_request().is_ok());
    }

    #[test]
    fn test_stays_closed_below_threshold() {
        let breaker = breaker(3, 1000, 1);
        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 2);
        assert!(breaker.allow_request().is_ok());
    }

    #[test]
    fn test_opens_at_threshold() {
        let breaker = breaker(3, 1000, 1);
        for _ in 0..3 {
            breaker.record_failure();
        }
        assert_eq!(breaker.state(), CircuitState::Open);

        let err = breaker.allow_request().unwrap_err();
        let (failures, retry_after) = err.as_circuit_open().expect("circuit-open error");
        assert_eq!(failures, 3);
        assert!(retry_after <= Duration::from_millis(1000));
        assert!(!retry_after.is_zero());
    }

    #[test]
    fn test_success_resets_consecutive_failures() {
        let breaker = breaker(3, 1000, 1);
        breaker.record_failure();
        breaker.record_failure();
        breaker.record_success();
        assert_eq!(breaker.failure_count(), 0);

        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn test_half_open_after_recovery_timeout() {
        let breaker = breaker(1, 30, 1);
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(breaker.allow_request().is_err());

        std::thread::sleep(Duration::from_millis(50));
        assert!(breaker.allow_request().is_ok());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);
    }

    #[test]
    fn test_half_open_closes_after_enough_successes() {
        let breaker = breaker(1, 30, 2);
        breaker.record_failure();
        std::thread::sleep(Duration::from_millis(50));
        assert!(breaker.allow_request().is_ok());

        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::HalfOpen);
        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 0);
    }

    #[test]
    fn test_half_open_failure_reopens_with_pinned_count() {
        let breaker = breaker(3, 30, 1);
        for _ in 0..3 {
            breaker.record_failure();
        }
        std::thread::sleep(Duration::from_millis(50));
        assert!(breaker.allow_request().is_ok());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);

        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
        assert_eq!(breaker.failure_count(), 3);
        assert!(breaker.allow_request().is_err());
    }

    #[test]
    fn test_retry_after_shrinks_over_time() {
        let breaker = breaker(1, 200, 1);
        breaker.record_failure();

        let first = breaker
            .allow_request()
            .unwrap_err()
            .retry_after()
            .expect("retry hint");
        std::thread::sleep(Duration::from_millis(60));
        let second = breaker
            .allow_request()
            .unwrap_err()
            .retry_after()
            .expect("retry hint");
        assert!(second < first, "{second:?} should be below {first:?}");
    }

    #[test]
    fn test_reset_closes_the_circuit() {
        let breaker = breaker(1, 60_000, 1);
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);

        breaker.reset();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 0);
        assert!(breaker.allow_request().is_ok());
    }

    #[test]
    fn test_concurrent_failures_open_exactly_once() {
        let breaker = Arc::new(breaker(50, 60_000, 1));
        let mut handles = Vec::new();
        for _ in 0..10 {
            let breaker = Arc::clone(&breaker);
            handles.push(std::thread::spawn(move || {
                for _ in 0..10 {
                    breaker.record_failure();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(breaker.failure_count(), 100);
        assert_eq!(breaker.state(), CircuitState::Open);
    }

    #[test]
    fn test_noop_breaker_never_opens() {
        let breaker = NoopCircuitBreaker;
        for _ in 0..100 {
            breaker.record_failure();
        }
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 0);
        assert!(breaker.allow_request().is_ok());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(CircuitState::Closed.to_string(), "closed");
        assert_eq!(CircuitState::Open.to_string(), "open");
        assert_eq!(CircuitState::HalfOpen.to_string(), "half-open");
    }
}
