//! HTTP transport layer.
//!
//! [`Transport`] is the seam between the request pipeline and the network:
//! the pipeline hands it a method, endpoint, and payload, and gets back a
//! neutral [`HttpResponse`] (or a classified transport error). The
//! production implementation wraps a pooled [`reqwest::Client`]; tests swap
//! in scripted fakes.

use crate::config::ClientConfig;
use crate::error::{ConfigValidationError, Error, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// HTTP methods accepted by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Parses a method name case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for anything outside the allowed set.
    pub fn parse(method: &str) -> Result<Self> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(Error::validation(format!(
                "HTTP method not allowed: {method}"
            ))),
        }
    }

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether responses to this method are eligible for caching.
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Self::Get)
    }

    fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
            Self::Patch => reqwest::Method::PATCH,
            Self::Head => reqwest::Method::HEAD,
            Self::Options => reqwest::Method::OPTIONS,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-read HTTP response, decoupled from any HTTP client library.
///
/// Header names are stored lowercase, matching the wire normalization
/// reqwest applies.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers with lowercase names.
    pub headers: HashMap<String, String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from parts. Header names are lowercased.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Parsed `Retry-After` header, integer-seconds form only.
    pub fn retry_after_hint(&self) -> Option<Duration> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Body decoded as UTF-8, with replacement characters for invalid
    /// sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Body parsed as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the body is not valid JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// The seam between the request pipeline and the network.
///
/// `send` resolves `endpoint` against the transport's base URL, attaches
/// `params` as the query string and `body` as a JSON payload, and reads the
/// response to completion. It returns `Ok` for every HTTP status; only
/// transport-level failures (unreachable host, timeout, oversized body)
/// become errors.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Performs one HTTP exchange.
    async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: Option<&Map<String, Value>>,
        body: Option<&Value>,
    ) -> Result<HttpResponse>;
}

/// Production transport over a pooled [`reqwest::Client`].
///
/// The client enforces the per-attempt timeout, keep-alive pool limits,
/// gzip decoding, and the default header set from [`ClientConfig`].
/// Response bodies are streamed so the size limit cuts oversized payloads
/// off mid-transfer instead of after buffering them whole.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    max_response_size: usize,
}

impl ReqwestTransport {
    /// Builds the transport from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a configured header value (credential,
    /// user agent) is not valid in an HTTP header, or [`Error::Connection`]
    /// when the underlying client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        for (name, value) in config.default_headers() {
            let value = reqwest::header::HeaderValue::from_str(&value).map_err(|_| {
                Error::from(ConfigValidationError::invalid(
                    "credential",
                    format!("value for header '{name}' contains invalid characters"),
                ))
            })?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_keepalive_connections as usize)
            .pool_idle_timeout(config.keepalive_expiry)
            .gzip(true)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_response_size: config.max_response_size,
        })
    }

    /// Reads a response to completion, enforcing the size limit while
    /// streaming.
    async fn read_response(&self, response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();

        // Reject early when the server declares an oversized body.
        if let Some(content_length) = response.content_length()
            && content_length > self.max_response_size as u64
        {
            return Err(Error::validation(format!(
                "Response too large: Content-Length {content_length} exceeds limit of {} bytes",
                self.max_response_size
            )));
        }

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let capacity = response
            .content_length()
            .map_or(8 * 1024, |len| len.min(self.max_response_size as u64) as usize);
        let mut body = Vec::with_capacity(capacity);

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if body.len().saturating_add(chunk.len()) > self.max_response_size {
                return Err(Error::validation(format!(
                    "Response body exceeds maximum size of {} bytes",
                    self.max_response_size
                )));
            }
            body.extend_from_slice(&chunk);
        }

        // A Content-Length much larger than the gzip-decoded body leaves
        // slack worth returning.
        if body.capacity() > body.len() + body.len() / 4 {
            body.shrink_to_fit();
        }

        Ok(HttpResponse::new(status, headers, body))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: Option<&Map<String, Value>>,
        body: Option<&Value>,
    ) -> Result<HttpResponse> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.client.request(method.as_reqwest(), &url);
        if let Some(params) = params {
            request = request.query(&query_pairs(params));
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        self.read_response(response).await
    }
}

/// Flattens a parameter map into query pairs.
///
/// Scalars stringify directly, arrays repeat the key once per element, and
/// anything else falls back to compact JSON.
fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar_string(item)));
                }
            }
            Value::Null => {}
            other => pairs.push((key.clone(), scalar_string(other))),
        }
    }
    pairs
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
