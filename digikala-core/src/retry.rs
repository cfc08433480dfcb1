//! Retry policy with exponential backoff.
//!
//! Classifies failures into a [`RetryDecision`] and computes the wait
//! before the next attempt. Timeouts, connection failures, and server
//! errors back off exponentially; a server-supplied `Retry-After` hint is
//! honored exactly; everything else aborts the sequence immediately so
//! deterministic failures (bad parameters, missing resources) surface on
//! the first attempt.

use crate::config::ClientConfig;
use crate::error::{ConfigValidationError, Error};
use rand::Rng;
use std::collections::HashSet;
use std::time::Duration;

/// Default ceiling for a single backoff delay.
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Retry tuning knobs.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum retry attempts beyond the first try (default: 3).
    pub max_retries: u32,
    /// Delay before the first retry (default: 1 second).
    pub initial_delay: Duration,
    /// Exponential backoff multiplier (default: 2.0).
    pub backoff_multiplier: f64,
    /// Ceiling for any single computed delay (default: 30 seconds).
    pub max_delay: Duration,
    /// Status codes that make otherwise-final errors retryable.
    pub retry_status_codes: HashSet<u16>,
    /// Fraction of the delay added as random jitter, `0.0..=1.0`
    /// (default: 0.0, no jitter).
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            backoff_multiplier: 2.0,
            max_delay: DEFAULT_MAX_DELAY,
            retry_status_codes: [429, 500, 502, 503, 504].into_iter().collect(),
            jitter_factor: 0.0,
        }
    }
}

impl From<&ClientConfig> for RetryConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: config.retry_delay,
            backoff_multiplier: config.retry_backoff,
            max_delay: DEFAULT_MAX_DELAY,
            retry_status_codes: config.retry_status_codes.clone(),
            jitter_factor: 0.0,
        }
    }
}

impl RetryConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] for a zero initial delay, a
    /// multiplier below 1.0, a ceiling below the initial delay, or a jitter
    /// factor outside `0.0..=1.0`.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if self.initial_delay.is_zero() {
            return Err(ConfigValidationError::too_low(
                "initial_delay",
                "0s",
                "1 millisecond",
            ));
        }
        if self.backoff_multiplier < 1.0 {
            return Err(ConfigValidationError::too_low(
                "backoff_multiplier",
                self.backoff_multiplier,
                1.0,
            ));
        }
        if self.max_delay < self.initial_delay {
            return Err(ConfigValidationError::too_low(
                "max_delay",
                format!("{:?}", self.max_delay),
                format!("initial_delay ({:?})", self.initial_delay),
            ));
        }
        if !(0.0..=1.0).contains(&self.jitter_factor) {
            return Err(ConfigValidationError::invalid(
                "jitter_factor",
                format!("{} is outside 0.0..=1.0", self.jitter_factor),
            ));
        }
        Ok(())
    }
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// The failure is final; surface it without another attempt.
    Abort,
    /// Transient failure; wait out the exponential backoff delay.
    Backoff,
    /// The server said exactly how long to wait; honor it verbatim.
    ServerHint(Duration),
}

/// Failure classifier and backoff calculator.
#[derive(Debug, Clone, Default)]
pub struct RetryStrategy {
    config: RetryConfig,
}

impl RetryStrategy {
    /// Creates a strategy from the given configuration.
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// The configured maximum number of retries beyond the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.config.max_retries
    }

    /// Classifies a failed attempt.
    ///
    /// Classification looks through context layers at the root cause:
    ///
    /// - Timeouts and connection failures back off.
    /// - Rate limits honor the server's `Retry-After` hint when present;
    ///   without a hint they take the status-set path like any other
    ///   status-carrying error.
    /// - Server errors (5xx) back off.
    /// - Any other error backs off only if its status code is in
    ///   `retry_status_codes`; otherwise the sequence aborts. Validation
    ///   failures and an open circuit always abort.
    pub fn evaluate(&self, error: &Error) -> RetryDecision {
        let root = error.root_cause();
        if let Error::RateLimit(details) = root
            && let Some(hint) = details.retry_after
        {
            return RetryDecision::ServerHint(hint);
        }
        match root {
            Error::Timeout(_) | Error::Connection(_) | Error::Server(_) => RetryDecision::Backoff,
            Error::Validation(_) | Error::CircuitOpen { .. } | Error::Config(_) => {
                RetryDecision::Abort
            }
            other => match other.status_code() {
                Some(status) if self.config.retry_status_codes.contains(&status) => {
                    RetryDecision::Backoff
                }
                _ => RetryDecision::Abort,
            },
        }
    }

    /// Computes the backoff delay before retry number `attempt` (0-based):
    /// `initial_delay * multiplier^attempt`, capped at `max_delay`, plus
    /// jitter when configured.
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let multiplier = self.config.backoff_multiplier.powi(attempt as i32);
        let delay_ms = (self.config.initial_delay.as_millis() as f64 * multiplier) as u64;
        let capped = Duration::from_millis(delay_ms).min(self.config.max_delay);
        self.apply_jitter(capped)
    }

    /// Adds up to `jitter_factor * delay` of random extra wait, spreading
    /// out retry storms from concurrent clients.
    fn apply_jitter(&self, delay: Duration) -> Duration {
        if self.config.jitter_factor <= 0.0 {
            return delay;
        }
        let jitter_range = (delay.as_millis() as f64 * self.config.jitter_factor) as u64;
        if jitter_range == 0 {
            return delay;
        }
        let mut rng = rand::rngs::ThreadRng::default();
        let jitter = rng.random_range(0..=jitter_range);
        delay + Duration::from_millis(jitter)
    }
}
