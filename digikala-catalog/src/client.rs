//! Client facade with an explicit open/close lifecycle.

use std::sync::Arc;

use tracing::{debug, info};

use crate::brands::BrandsService;
use crate::products::ProductsService;
use crate::sellers::SellersService;
use digikala_core::cache::ResponseCache;
use digikala_core::config::{ClientConfig, ClientConfigBuilder};
use digikala_core::error::{Error, Result};
use digikala_core::pipeline::RequestPipeline;
use digikala_core::transport::Transport;

const NOT_OPENED: &str = "Client is not opened. Call open() before making requests";

/// Asynchronous client for the Digikala storefront API.
///
/// Construction is cheap and performs no I/O; `open()` builds the transport
/// and the request pipeline, `close()` tears them down. Both are idempotent.
///
/// # Example
///
/// ```rust,no_run
/// use digikala_catalog::DigikalaClient;
/// use digikala_core::config::ClientConfig;
///
/// # async fn run() -> digikala_core::error::Result<()> {
/// let mut client = DigikalaClient::new(ClientConfig::default());
/// client.open()?;
///
/// let response = client.products()?.get_product(12345).await?;
/// if let Some(product) = response.data.product.as_active() {
///     println!("{}", product.title_fa);
/// }
///
/// client.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DigikalaClient {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<Arc<dyn ResponseCache>>,
    pipeline: Option<Arc<RequestPipeline>>,
}

impl DigikalaClient {
    /// Creates a closed client from a configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            cache: None,
            pipeline: None,
        }
    }

    /// Creates a builder for a client with injected capabilities.
    pub fn builder() -> DigikalaClientBuilder {
        DigikalaClientBuilder::default()
    }

    /// Opens the client, building the transport and the request pipeline.
    ///
    /// A no-op when the client is already open. Fails when the configuration
    /// does not validate.
    pub fn open(&mut self) -> Result<()> {
        if self.pipeline.is_some() {
            return Ok(());
        }

        let mut builder = RequestPipeline::builder(self.config.clone());
        if let Some(transport) = &self.transport {
            builder = builder.transport(Arc::clone(transport));
        }
        if let Some(cache) = &self.cache {
            builder = builder.cache(Arc::clone(cache));
        }
        self.pipeline = Some(Arc::new(builder.build()?));
        info!(base_url = %self.config.base_url, "Digikala client opened");
        Ok(())
    }

    /// Closes the client, releasing the pipeline and its connection pool.
    ///
    /// A no-op when the client is already closed.
    pub fn close(&mut self) {
        if self.pipeline.take().is_some() {
            debug!("Digikala client closed");
        }
    }

    /// Whether `open()` has been called and `close()` has not.
    pub fn is_open(&self) -> bool {
        self.pipeline.is_some()
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Product detail and search operations.
    pub fn products(&self) -> Result<ProductsService> {
        Ok(ProductsService::new(self.pipeline()?))
    }

    /// Seller profile and listing operations.
    pub fn sellers(&self) -> Result<SellersService> {
        Ok(SellersService::new(self.pipeline()?))
    }

    /// Brand profile and listing operations.
    pub fn brands(&self) -> Result<BrandsService> {
        Ok(BrandsService::new(self.pipeline()?))
    }

    fn pipeline(&self) -> Result<Arc<RequestPipeline>> {
        self.pipeline
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| Error::api(NOT_OPENED))
    }
}

/// Builder for [`DigikalaClient`].
///
/// Lets tests and alternative backends inject a [`Transport`] or a
/// [`ResponseCache`] that the pipeline will use once the client is opened.
#[derive(Debug, Default)]
pub struct DigikalaClientBuilder {
    config: Option<ClientConfig>,
    config_builder: ClientConfigBuilder,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<Arc<dyn ResponseCache>>,
}

impl DigikalaClientBuilder {
    /// Uses a fully constructed configuration, overriding any individual
    /// settings applied through the builder.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Authenticates with an API key (`X-API-Key` header).
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(key);
        self
    }

    /// Authenticates with a bearer token (`Authorization` header).
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.bearer_token(token);
        self
    }

    /// Replaces the HTTP transport used by the pipeline.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the response cache used by the pipeline.
    pub fn cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Builds the client. The client still has to be opened before use.
    ///
    /// Fails when the assembled configuration does not validate.
    pub fn build(self) -> Result<DigikalaClient> {
        let config = match self.config {
            Some(config) => config,
            None => self.config_builder.build()?,
        };
        Ok(DigikalaClient {
            config,
            transport: self.transport,
            cache: self.cache,
            pipeline: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_starts_closed() {
        let client = DigikalaClient::new(ClientConfig::default());
        assert!(!client.is_open());
        assert!(client.products().is_err());
        assert!(client.sellers().is_err());
        assert!(client.brands().is_err());
    }

    #[test]
    fn test_accessor_error_names_the_fix() {
        let client = DigikalaClient::new(ClientConfig::default());
        let err = client.products().unwrap_err();
        assert!(err.to_string().contains("open()"));
    }

    #[test]
    fn test_open_and_close_are_idempotent() {
        let mut client = DigikalaClient::new(ClientConfig::default());
        client.open().unwrap();
        assert!(client.is_open());
        client.open().unwrap();
        assert!(client.is_open());

        client.close();
        assert!(!client.is_open());
        client.close();
        assert!(!client.is_open());
    }

    #[test]
    fn test_services_available_after_open() {
        let mut client = DigikalaClient::new(ClientConfig::default());
        client.open().unwrap();
        assert!(client.products().is_ok());
        assert!(client.sellers().is_ok());
        assert!(client.brands().is_ok());
    }

    #[test]
    fn test_reopen_after_close() {
        let mut client = DigikalaClient::new(ClientConfig::default());
        client.open().unwrap();
        client.close();
        assert!(client.products().is_err());

        client.open().unwrap();
        assert!(client.products().is_ok());
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = ClientConfig {
            retry_backoff: 0.5,
            ..ClientConfig::default()
        };
        let mut client = DigikalaClient::new(config);
        assert!(client.open().is_err());
        assert!(!client.is_open());
    }

    #[test]
    fn test_builder_with_credentials() {
        let client = DigikalaClient::builder()
            .api_key("test-key")
            .build()
            .unwrap();
        assert!(client.config().credential.is_some());
    }
}
