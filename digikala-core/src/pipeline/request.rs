use crate::envelope::ApiResponse;
use crate::error::Result;
use crate::retry::RetryDecision;
use crate::transport::HttpMethod;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::future::Future;
use tracing::{debug, error, instrument, warn};

use super::builder::RequestPipeline;
use super::response::map_response;

impl RequestPipeline {
    /// Executes one logical API call through the full pipeline.
    ///
    /// `method` is validated case-insensitively against the HTTP allow-set
    /// before anything else runs. GET responses are served from cache when
    /// one is configured; all successful GET responses are written back to
    /// it. Transient failures are retried per the retry policy, with the
    /// circuit breaker consulted before every attempt.
    ///
    /// # Errors
    ///
    /// The classified error for whatever failed: validation, circuit-open,
    /// transport, status-mapped API errors, or schema mismatch. Transient
    /// errors surface only after the retry budget is exhausted.
    #[instrument(
        name = "api_request",
        skip_all,
        fields(method = %method, endpoint = %endpoint, status = tracing::field::Empty)
    )]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        endpoint: &str,
        params: Option<Map<String, Value>>,
        body: Option<Value>,
    ) -> Result<ApiResponse<T>> {
        let method = HttpMethod::parse(method)?;
        self.validator.validate_endpoint(endpoint)?;
        if let Some(params) = params.as_ref() {
            self.validator.validate_params(params)?;
        }

        self.rate_limiter.acquire().await;

        let cache_key = (method.is_cacheable() && self.cache.is_some())
            .then(|| crate::cache::cache_key(endpoint, params.as_ref()));

        if let Some(key) = cache_key.as_deref()
            && let Some(response) = self.cache_lookup::<T>(key).await
        {
            tracing::Span::current().record("status", u64::from(response.status));
            return Ok(response);
        }

        let (response, envelope) = self
            .execute_with_retry(|| {
                self.attempt::<T>(
                    method,
                    endpoint,
                    params.as_ref(),
                    body.as_ref(),
                    cache_key.is_some(),
                )
            })
            .await?;
        tracing::Span::current().record("status", u64::from(response.status));

        if let Some(key) = cache_key.as_deref()
            && let Some(cache) = self.cache.as_deref()
            && let Some(envelope) = envelope
            && let Err(e) = cache.set(key, envelope, Some(self.config.cache.ttl)).await
        {
            // Caching is an optimization; a failed write never fails the call.
            warn!(cache_key = %key, error = %e, "Failed to write response to cache");
        }

        Ok(response)
    }

    /// Executes a GET request.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<Map<String, Value>>,
    ) -> Result<ApiResponse<T>> {
        self.request("GET", endpoint, params, None).await
    }

    /// Executes a POST request.
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<Map<String, Value>>,
        body: Option<Value>,
    ) -> Result<ApiResponse<T>> {
        self.request("POST", endpoint, params, body).await
    }

    /// Executes a PUT request.
    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<Map<String, Value>>,
        body: Option<Value>,
    ) -> Result<ApiResponse<T>> {
        self.request("PUT", endpoint, params, body).await
    }

    /// Executes a DELETE request.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: Option<Map<String, Value>>,
    ) -> Result<ApiResponse<T>> {
        self.request("DELETE", endpoint, params, None).await
    }

    /// Serves a request from cache if a usable entry exists.
    ///
    /// Read failures and entries that no longer unwrap cleanly (a schema
    /// change since they were written) degrade to a miss.
    async fn cache_lookup<T: DeserializeOwned>(&self, key: &str) -> Option<ApiResponse<T>> {
        let cache = self.cache.as_deref()?;
        let envelope = match cache.get(key).await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => return None,
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Cache read failed, falling through to network");
                return None;
            }
        };
        match ApiResponse::from_value(envelope) {
            Ok(response) => {
                debug!(cache_key = %key, "Cache hit");
                Some(response)
            }
            Err(e) => {
                warn!(
                    cache_key = %key,
                    error = %e,
                    "Cached response no longer unwraps, falling through to network"
                );
                None
            }
        }
    }

    /// One attempt: breaker gate, transport call, status mapping, envelope
    /// unwrap. The breaker records the outcome of everything past its gate;
    /// it never inspects what kind of failure occurred.
    async fn attempt<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: Option<&Map<String, Value>>,
        body: Option<&Value>,
        keep_envelope: bool,
    ) -> Result<(ApiResponse<T>, Option<Value>)> {
        self.circuit_breaker.allow_request()?;

        let outcome = async {
            let response = self.transport.send(method, endpoint, params, body).await?;
            let envelope = map_response(&response)?;
            let raw = keep_envelope.then(|| envelope.clone());
            let typed = ApiResponse::from_value(envelope)?;
            Ok((typed, raw))
        }
        .await;

        match &outcome {
            Ok(_) => self.circuit_breaker.record_success(),
            Err(_) => self.circuit_breaker.record_failure(),
        }
        outcome
    }

    /// Drives an operation through the retry policy.
    ///
    /// Retries run only while the budget allows; the last observed error
    /// propagates once it is spent. Abort-classified errors propagate
    /// immediately regardless of remaining budget.
    pub(super) async fn execute_with_retry<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_retries = self.retry_strategy.max_retries();
        let mut attempt: u32 = 0;
        loop {
            match operation().await {
                Ok(value) => {
                    debug!(attempt = attempt + 1, "Request attempt succeeded");
                    return Ok(value);
                }
                Err(e) => {
                    let decision = self.retry_strategy.evaluate(&e);
                    if decision == RetryDecision::Abort {
                        error!(
                            attempt = attempt + 1,
                            error = %e,
                            error_debug = ?e,
                            is_retryable = e.is_retryable(),
                            "Request failed, not retrying"
                        );
                        return Err(e);
                    }
                    if attempt >= max_retries {
                        error!(
                            attempt = attempt + 1,
                            error = %e,
                            error_debug = ?e,
                            "Request failed, retry budget exhausted"
                        );
                        return Err(e);
                    }
                    let delay = match decision {
                        RetryDecision::ServerHint(hint) => {
                            warn!(
                                attempt = attempt + 1,
                                delay_ms = %hint.as_millis(),
                                error = %e,
                                "Rate limited, honoring server retry hint"
                            );
                            hint
                        }
                        _ => {
                            let delay = self.retry_strategy.calculate_delay(attempt);
                            warn!(
                                attempt = attempt + 1,
                                delay_ms = %delay.as_millis(),
                                error = %e,
                                error_debug = ?e,
                                is_retryable = e.is_retryable(),
                                "Request failed, retrying after backoff"
                            );
                            delay
                        }
                    };
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
