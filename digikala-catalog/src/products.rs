//! Product endpoints: detail, fresh detail, and catalog search.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::models::{ProductDetailResponse, ProductSearchResponse};
use digikala_core::error::Result;
use digikala_core::pipeline::RequestPipeline;

/// Product-related API operations.
///
/// Obtained from [`DigikalaClient::products`](crate::DigikalaClient::products);
/// cheap to clone, every clone shares the same pipeline.
#[derive(Debug, Clone)]
pub struct ProductsService {
    pipeline: Arc<RequestPipeline>,
}

impl ProductsService {
    pub(crate) fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    /// Fetches the full product record by numeric id.
    ///
    /// Delisted products come back as an inactive stub rather than an error;
    /// check [`ProductRecord::is_inactive`](crate::models::ProductRecord::is_inactive).
    pub async fn get_product(&self, id: u64) -> Result<ProductDetailResponse> {
        let endpoint = format!("/v2/product/{id}/");
        self.pipeline.get(&endpoint, None).await
    }

    /// Fetches a product record from the grocery storefront.
    ///
    /// Same payload shape as [`get_product`](Self::get_product), served from
    /// the fresh catalog.
    pub async fn get_fresh_product(&self, id: u64) -> Result<ProductDetailResponse> {
        let endpoint = format!("/fresh/v1/product/{id}/");
        self.pipeline.get(&endpoint, None).await
    }

    /// Searches the catalog.
    ///
    /// `page` defaults to the first page when `None`.
    pub async fn search(&self, q: &str, page: Option<u32>) -> Result<ProductSearchResponse> {
        let mut params = Map::new();
        params.insert("q".to_string(), Value::from(q));
        params.insert("page".to_string(), Value::from(page.unwrap_or(1)));
        self.pipeline.get("/v1/search/", Some(params)).await
    }
}
