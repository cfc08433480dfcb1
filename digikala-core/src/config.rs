//! Client configuration structures and builders.

use crate::credentials::{Credential, SecretString};
use crate::error::{ConfigValidationError, ValidationResult};
use std::collections::HashSet;
use std::time::Duration;

/// Cache backend selection.
///
/// Only an in-process backend ships with the crate; distributed backends can
/// be plugged in through the [`ResponseCache`](crate::cache::ResponseCache)
/// trait without touching this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    /// In-process map with per-entry TTL.
    #[default]
    Memory,
}

/// Response caching policy.
///
/// Caching applies to GET requests only and is disabled by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Whether response caching is active.
    pub enabled: bool,
    /// Which backend stores the entries.
    pub backend: CacheBackend,
    /// How long an entry stays valid.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            backend: CacheBackend::Memory,
            ttl: Duration::from_secs(300),
        }
    }
}

impl CacheConfig {
    /// Memory-backed caching with the given TTL.
    pub fn memory(ttl: Duration) -> Self {
        Self {
            enabled: true,
            backend: CacheBackend::Memory,
            ttl,
        }
    }
}

/// Client configuration.
///
/// Immutable after construction. Build one with [`ClientConfig::builder`],
/// which validates eagerly, or fill the fields directly and call
/// [`validate`](ClientConfig::validate) yourself.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API (default: `https://api.digikala.com`).
    pub base_url: String,
    /// Credential attached to every request, if any.
    pub credential: Option<Credential>,
    /// Per-attempt request timeout (default: 30 seconds).
    pub timeout: Duration,
    /// Maximum retry attempts beyond the first try (default: 3).
    pub max_retries: u32,
    /// Initial retry delay (default: 1 second).
    pub retry_delay: Duration,
    /// Exponential backoff multiplier (default: 2.0).
    pub retry_backoff: f64,
    /// HTTP status codes eligible for retry (default: 429, 500, 502, 503, 504).
    pub retry_status_codes: HashSet<u16>,
    /// Maximum total connections in the pool (default: 100).
    pub max_connections: u32,
    /// Maximum idle keep-alive connections to retain (default: 20).
    pub max_keepalive_connections: u32,
    /// How long an idle connection survives before eviction (default: 30 seconds).
    pub keepalive_expiry: Duration,
    /// Maximum requests per 60-second window, 0 = disabled (default: 100).
    pub rate_limit_requests: u32,
    /// Response caching policy (default: disabled).
    pub cache: CacheConfig,
    /// User-Agent header value.
    pub user_agent: String,
    /// Maximum response body size in bytes (default: 10MB).
    ///
    /// Responses exceeding this limit are rejected while streaming. This
    /// protects against abnormal responses that could exhaust memory.
    pub max_response_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.digikala.com".to_string(),
            credential: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            retry_backoff: 2.0,
            retry_status_codes: [429, 500, 502, 503, 504].into_iter().collect(),
            max_connections: 100,
            max_keepalive_connections: 20,
            keepalive_expiry: Duration::from_secs(30),
            rate_limit_requests: 100,
            cache: CacheConfig::default(),
            user_agent: format!("digikala-rust/{}", env!("CARGO_PKG_VERSION")),
            max_response_size: 10 * 1024 * 1024,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    ///
    /// # Example
    ///
    /// ```rust
    /// use digikala_core::config::ClientConfig;
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::builder()
    ///     .api_key("your-api-key")
    ///     .timeout(Duration::from_secs(60))
    ///     .max_retries(5)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Validates the configuration parameters.
    ///
    /// # Returns
    ///
    /// Returns `Ok(ValidationResult)` if the configuration is valid.
    /// The `ValidationResult` may contain warnings for suboptimal but valid configurations.
    ///
    /// Returns `Err(ConfigValidationError)` if the configuration is invalid.
    ///
    /// # Validation Rules
    ///
    /// - `base_url` must be non-empty and start with `http://` or `https://`
    /// - `timeout`, `retry_delay` and `keepalive_expiry` must be non-zero
    /// - `retry_backoff` must be >= 1.0
    /// - `max_connections` must be non-zero, and `max_keepalive_connections`
    ///   must not exceed it
    /// - `max_response_size` must be non-zero
    ///
    /// # Example
    ///
    /// ```rust
    /// use digikala_core::config::ClientConfig;
    ///
    /// let config = ClientConfig::default();
    /// let result = config.validate();
    /// assert!(result.is_ok());
    ///
    /// let invalid_config = ClientConfig {
    ///     retry_backoff: 0.5, // Shrinking delays
    ///     ..Default::default()
    /// };
    /// let result = invalid_config.validate();
    /// assert!(result.is_err());
    /// ```
    pub fn validate(&self) -> std::result::Result<ValidationResult, ConfigValidationError> {
        let mut warnings = Vec::new();

        if self.base_url.is_empty() {
            return Err(ConfigValidationError::missing("base_url"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigValidationError::invalid(
                "base_url",
                "must start with http:// or https://",
            ));
        }

        if self.timeout.is_zero() {
            return Err(ConfigValidationError::too_low(
                "timeout",
                "0s",
                "1 millisecond",
            ));
        }
        if self.timeout < Duration::from_secs(1) {
            warnings.push(format!(
                "timeout {:?} is very short, may cause frequent timeouts",
                self.timeout
            ));
        }
        if self.timeout > Duration::from_secs(300) {
            warnings.push(format!(
                "timeout {:?} is very long, a stuck request will block its caller for the full duration",
                self.timeout
            ));
        }

        if self.retry_delay.is_zero() {
            return Err(ConfigValidationError::too_low(
                "retry_delay",
                "0s",
                "1 millisecond",
            ));
        }
        if self.retry_backoff < 1.0 {
            return Err(ConfigValidationError::too_low(
                "retry_backoff",
                self.retry_backoff,
                1.0,
            ));
        }
        if self.max_retries > 10 {
            warnings.push(format!(
                "max_retries {} is high, a failing endpoint will be hammered",
                self.max_retries
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigValidationError::too_low("max_connections", 0, 1));
        }
        if self.max_keepalive_connections > self.max_connections {
            return Err(ConfigValidationError::too_high(
                "max_keepalive_connections",
                self.max_keepalive_connections,
                format!("max_connections ({})", self.max_connections),
            ));
        }
        if self.keepalive_expiry.is_zero() {
            return Err(ConfigValidationError::too_low(
                "keepalive_expiry",
                "0s",
                "1 millisecond",
            ));
        }

        if self.max_response_size == 0 {
            return Err(ConfigValidationError::invalid(
                "max_response_size",
                "max_response_size cannot be zero",
            ));
        }

        Ok(ValidationResult::with_warnings(warnings))
    }

    /// Headers attached to every request.
    ///
    /// Always includes `Content-Type` and `Accept`; adds exactly one
    /// authentication header when a credential is configured.
    pub fn default_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("Content-Type", "application/json".to_string()),
            ("Accept", "application/json".to_string()),
        ];
        if let Some(credential) = &self.credential {
            headers.push((credential.header_name(), credential.header_value()));
        }
        headers
    }
}

/// Builder for `ClientConfig`
///
/// Provides a fluent API for constructing client configurations.
/// `build()` validates eagerly, so an invalid configuration surfaces here
/// rather than on the first request.
///
/// # Example
///
/// ```rust
/// use digikala_core::config::ClientConfigBuilder;
/// use std::time::Duration;
///
/// let config = ClientConfigBuilder::new()
///     .bearer_token("your-token")
///     .timeout(Duration::from_secs(60))
///     .rate_limit_requests(50)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
    api_key: Option<SecretString>,
    bearer_token: Option<SecretString>,
}

impl ClientConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the API key for authentication
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(key));
        self
    }

    /// Set the bearer token for authentication
    ///
    /// When both an API key and a bearer token are set, the bearer token wins.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(SecretString::new(token));
        self
    }

    /// Set the per-attempt request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum number of retries beyond the first attempt
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the initial retry delay
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Set the exponential backoff multiplier
    pub fn retry_backoff(mut self, backoff: f64) -> Self {
        self.config.retry_backoff = backoff;
        self
    }

    /// Replace the set of retryable HTTP status codes
    pub fn retry_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.config.retry_status_codes = codes.into_iter().collect();
        self
    }

    /// Set the maximum total connections in the pool
    pub fn max_connections(mut self, max: u32) -> Self {
        self.config.max_connections = max;
        self
    }

    /// Set the maximum idle keep-alive connections
    pub fn max_keepalive_connections(mut self, max: u32) -> Self {
        self.config.max_keepalive_connections = max;
        self
    }

    /// Set the idle connection expiry
    pub fn keepalive_expiry(mut self, expiry: Duration) -> Self {
        self.config.keepalive_expiry = expiry;
        self
    }

    /// Set the per-minute request quota (0 disables rate limiting)
    pub fn rate_limit_requests(mut self, requests_per_minute: u32) -> Self {
        self.config.rate_limit_requests = requests_per_minute;
        self
    }

    /// Set the response caching policy
    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Set a custom user agent string
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the maximum response body size in bytes
    pub fn max_response_size(mut self, bytes: usize) -> Self {
        self.config.max_response_size = bytes;
        self
    }

    /// Build and validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigValidationError`] describing the first invalid field.
    pub fn build(mut self) -> std::result::Result<ClientConfig, ConfigValidationError> {
        // Bearer token takes precedence when both credentials are supplied.
        self.config.credential = match (self.bearer_token, self.api_key) {
            (Some(token), _) => Some(Credential::Bearer(token)),
            (None, Some(key)) => Some(Credential::ApiKey(key)),
            (None, None) => None,
        };

        let result = self.config.validate()?;
        for warning in &result.warnings {
            tracing::warn!(warning = %warning, "Suboptimal client configuration");
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        let result = config.validate();
        assert!(result.is_ok());
        assert!(result.unwrap().warnings.is_empty());
    }

    #[test]
    fn test_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.digikala.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(1));
        assert_eq!(config.retry_backoff, 2.0);
        assert_eq!(config.rate_limit_requests, 100);
        assert!(!config.cache.enabled);
        for code in [429, 500, 502, 503, 504] {
            assert!(config.retry_status_codes.contains(&code));
        }
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field_name(), "timeout");
    }

    #[test]
    fn test_validate_rejects_shrinking_backoff() {
        let config = ClientConfig {
            retry_backoff: 0.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field_name(), "retry_backoff");
        assert!(matches!(err, ConfigValidationError::ValueTooLow { .. }));
    }

    #[test]
    fn test_validate_rejects_keepalive_above_max() {
        let config = ClientConfig {
            max_connections: 10,
            max_keepalive_connections: 20,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field_name(), "max_keepalive_connections");
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = ClientConfig {
            base_url: "ftp://api.digikala.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            base_url: String::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigValidationError::ValueMissing { .. }));
    }

    #[test]
    fn test_validate_warns_on_short_timeout() {
        let config = ClientConfig {
            timeout: Duration::from_millis(500),
            ..Default::default()
        };
        let result = config.validate().unwrap();
        assert!(result.has_warnings());
    }

    #[test]
    fn test_builder_bearer_token_wins() {
        let config = ClientConfig::builder()
            .api_key("key")
            .bearer_token("token")
            .build()
            .unwrap();
        let credential = config.credential.expect("credential should be set");
        assert_eq!(credential.header_name(), "Authorization");
        assert_eq!(credential.header_value(), "Bearer token");
    }

    #[test]
    fn test_builder_api_key_only() {
        let config = ClientConfig::builder().api_key("key").build().unwrap();
        let credential = config.credential.expect("credential should be set");
        assert_eq!(credential.header_name(), "X-API-Key");
        assert_eq!(credential.header_value(), "key");
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = ClientConfig::builder().retry_delay(Duration::ZERO).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_default_headers_without_credential() {
        let config = ClientConfig::default();
        let headers = config.default_headers();
        assert_eq!(headers.len(), 2);
        assert!(
            headers
                .iter()
                .any(|(name, value)| *name == "Content-Type" && value == "application/json")
        );
        assert!(
            headers
                .iter()
                .any(|(name, value)| *name == "Accept" && value == "application/json")
        );
    }

    #[test]
    fn test_default_headers_with_bearer() {
        let config = ClientConfig::builder()
            .bearer_token("secret")
            .build()
            .unwrap();
        let headers = config.default_headers();
        assert_eq!(headers.len(), 3);
        assert!(
            headers
                .iter()
                .any(|(name, value)| *name == "Authorization" && value == "Bearer secret")
        );
        assert!(!headers.iter().any(|(name, _)| *name == "X-API-Key"));
    }

    #[test]
    fn test_cache_config_memory() {
        let cache = CacheConfig::memory(Duration::from_secs(60));
        assert!(cache.enabled);
        assert_eq!(cache.backend, CacheBackend::Memory);
        assert_eq!(cache.ttl, Duration::from_secs(60));
    }
}
