use crate::cache::{MemoryCache, ResponseCache};
use crate::circuit_breaker::{CircuitBreaker, DefaultCircuitBreaker};
use crate::config::{CacheBackend, ClientConfig};
use crate::error::Result;
use crate::rate_limiter::{NoopRateLimiter, RateLimiter, TokenBucketLimiter};
use crate::retry::{RetryConfig, RetryStrategy};
use crate::transport::{ReqwestTransport, Transport};
use crate::validator::{DefaultValidator, RequestValidator};
use std::sync::Arc;

/// The request orchestrator.
///
/// Owns one instance of every pipeline capability and drives them in order
/// for each call. Cheap to share: wrap it in an [`Arc`] and clone across
/// tasks; all capabilities are internally synchronized.
#[derive(Debug)]
pub struct RequestPipeline {
    pub(super) config: ClientConfig,
    pub(super) transport: Arc<dyn Transport>,
    pub(super) validator: Arc<dyn RequestValidator>,
    pub(super) rate_limiter: Arc<dyn RateLimiter>,
    pub(super) circuit_breaker: Arc<dyn CircuitBreaker>,
    pub(super) cache: Option<Arc<dyn ResponseCache>>,
    pub(super) retry_strategy: RetryStrategy,
}

impl RequestPipeline {
    /// Builds a pipeline with default capabilities for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) for an invalid
    /// configuration, or a transport construction error.
    pub fn new(config: ClientConfig) -> Result<Self> {
        PipelineBuilder::new(config).build()
    }

    /// Starts a builder for swapping individual capabilities.
    pub fn builder(config: ClientConfig) -> PipelineBuilder {
        PipelineBuilder::new(config)
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The circuit breaker guarding this pipeline's requests.
    pub fn circuit_breaker(&self) -> &Arc<dyn CircuitBreaker> {
        &self.circuit_breaker
    }

    /// The response cache, when caching is active.
    pub fn cache(&self) -> Option<&Arc<dyn ResponseCache>> {
        self.cache.as_ref()
    }
}

/// Builder wiring capabilities into a [`RequestPipeline`].
///
/// Every capability not supplied explicitly is constructed from the
/// configuration: a pooled HTTP transport, the default validator, a token
/// bucket limiter (or a no-op one when the quota is 0), a fresh circuit
/// breaker, and an in-memory cache when caching is enabled.
#[derive(Debug)]
pub struct PipelineBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    validator: Option<Arc<dyn RequestValidator>>,
    rate_limiter: Option<Arc<dyn RateLimiter>>,
    circuit_breaker: Option<Arc<dyn CircuitBreaker>>,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl PipelineBuilder {
    /// Creates a builder for the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            validator: None,
            rate_limiter: None,
            circuit_breaker: None,
            cache: None,
        }
    }

    /// Use a custom transport instead of the pooled HTTP client.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom request validator.
    pub fn validator(mut self, validator: Arc<dyn RequestValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Use a custom rate limiter.
    pub fn rate_limiter(mut self, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    /// Use a custom circuit breaker.
    pub fn circuit_breaker(mut self, circuit_breaker: Arc<dyn CircuitBreaker>) -> Self {
        self.circuit_breaker = Some(circuit_breaker);
        self
    }

    /// Use a custom cache backend. Supplying one activates caching even
    /// when the configuration leaves it disabled.
    pub fn cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Validates the configuration and assembles the pipeline.
    ///
    /// Configuration warnings are not re-logged here; they surface when the
    /// configuration itself is built via [`ClientConfig::builder`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) for an invalid
    /// configuration, or the transport's construction error.
    pub fn build(self) -> Result<RequestPipeline> {
        self.config.validate()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.config)?),
        };

        let rate_limiter: Arc<dyn RateLimiter> = match self.rate_limiter {
            Some(limiter) => limiter,
            None if self.config.rate_limit_requests == 0 => Arc::new(NoopRateLimiter),
            None => Arc::new(TokenBucketLimiter::new(self.config.rate_limit_requests)),
        };

        let cache: Option<Arc<dyn ResponseCache>> = match self.cache {
            Some(cache) => Some(cache),
            None if self.config.cache.enabled => match self.config.cache.backend {
                CacheBackend::Memory => Some(Arc::new(MemoryCache::new())),
            },
            None => None,
        };

        let circuit_breaker: Arc<dyn CircuitBreaker> = self
            .circuit_breaker
            .unwrap_or_else(|| Arc::new(DefaultCircuitBreaker::default()));

        let validator: Arc<dyn RequestValidator> =
            self.validator.unwrap_or_else(|| Arc::new(DefaultValidator));

        let retry_strategy = RetryStrategy::new(RetryConfig::from(&self.config));

        Ok(RequestPipeline {
            config: self.config,
            transport,
            validator,
            rate_limiter,
            circuit_breaker,
            cache,
            retry_strategy,
        })
    }
}
