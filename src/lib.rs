//! # Digikala Rust
//!
//! A resilient async Rust client for the Digikala storefront API, combining
//! typed endpoint services with client-side protection: request validation,
//! rate limiting, response caching, circuit breaking, and retry with
//! exponential backoff.
//!
//! ## Features
//!
//! - **Async/Await**: Built on tokio and reqwest for efficient async I/O
//! - **Type Safety**: Typed response models for products, search, sellers,
//!   and brands
//! - **Resilience**: Circuit breaker, retries with server hints, and
//!   fixed-window rate limiting built into every request
//! - **Pluggable**: Transport and cache backends can be swapped without
//!   touching the endpoint services
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use digikala::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder()
//!         .rate_limit_requests(60)
//!         .build()?;
//!
//!     let mut client = DigikalaClient::new(config);
//!     client.open()?;
//!
//!     let response = client.products()?.search("گوشی سامسونگ", None).await?;
//!     for product in &response.data.products {
//!         println!("{} ({})", product.title_fa, product.id);
//!     }
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// Re-export the member crates for consumers that need the full surface.
pub use digikala_catalog;
pub use digikala_core;

// Re-export the handful of types most programs start from.
pub use digikala_catalog::{DigikalaClient, DigikalaClientBuilder};
pub use digikala_core::config::{ClientConfig, ClientConfigBuilder};
pub use digikala_core::error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use digikala_catalog::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_package() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_client_lifecycle_through_facade() {
        let config = ClientConfig::builder()
            .build()
            .expect("default config should validate");
        let mut client = DigikalaClient::new(config);
        assert!(!client.is_open());

        client.open().expect("client should open");
        assert!(client.is_open());
        assert!(client.products().is_ok());

        client.close();
        assert!(client.products().is_err());
    }
}
