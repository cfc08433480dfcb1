//! # Digikala Catalog Library
//!
//! Typed endpoint clients for the Digikala storefront API, built on top of
//! the `digikala-core` request pipeline.
//!
//! # Supported Endpoints
//!
//! - Product details (including the fresh/supermarket variant)
//! - Product search
//! - Seller profiles and seller product listings
//! - Brand profiles and brand product listings
//!
//! # Example
//!
//! ```rust,no_run
//! use digikala_catalog::DigikalaClient;
//! use digikala_core::ClientConfig;
//!
//! # async fn example() -> digikala_core::Result<()> {
//! let config = ClientConfig::builder()
//!     .rate_limit_requests(60)
//!     .max_retries(3)
//!     .build()?;
//!
//! let mut client = DigikalaClient::new(config);
//! client.open()?;
//!
//! let response = client.products()?.get_product(10_495_550).await?;
//! if let Some(product) = response.data.product.as_active() {
//!     println!("{}: {} variants", product.title_fa, product.variants.len());
//! }
//!
//! client.close();
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
//
// ============================================================================
// Pedantic lints we deliberately allow, each with a reason.
// ============================================================================
//
// module_name_repetitions: `models::product::ProductRecord` and the service
//   structs read better with their full names at the call site.
#![allow(clippy::module_name_repetitions)]
// missing_errors_doc: every fallible method returns the shared error type,
//   which documents its variants centrally.
#![allow(clippy::missing_errors_doc)]
// must_use_candidate: blanket #[must_use] on every getter adds noise without
//   catching real bugs.
#![allow(clippy::must_use_candidate)]
// doc_markdown: flags product names like Digikala and DigiPlus that are not
//   code items.
#![allow(clippy::doc_markdown)]
// struct_excessive_bools: the API models carry the flag blocks exactly as
//   the upstream payloads define them.
#![allow(clippy::struct_excessive_bools)]
// return_self_not_must_use: builder setters are always chained into build().
#![allow(clippy::return_self_not_must_use)]

// Re-export digikala-core so downstream crates can stay version-aligned
// without declaring it directly.
pub use digikala_core;

pub mod brands;
pub mod client;
pub mod models;
pub mod products;
pub mod sellers;

// Convenience re-exports of the types nearly every consumer touches.
pub use brands::BrandsService;
pub use client::{DigikalaClient, DigikalaClientBuilder};
pub use products::ProductsService;
pub use sellers::SellersService;

/// Commonly used types, importable in one line.
///
/// ```rust
/// use digikala_catalog::prelude::*;
/// ```
pub mod prelude {
    pub use crate::brands::BrandsService;
    pub use crate::client::{DigikalaClient, DigikalaClientBuilder};
    pub use crate::models::{
        BrandProductsResponse, ProductDetailResponse, ProductRecord, ProductSearchResponse,
        SellerProductListResponse,
    };
    pub use crate::products::ProductsService;
    pub use crate::sellers::SellersService;
    pub use digikala_core::prelude::*;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
