//! Brand endpoints.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::models::BrandProductsResponse;
use digikala_core::error::Result;
use digikala_core::pipeline::RequestPipeline;

/// Brand-related API operations.
#[derive(Debug, Clone)]
pub struct BrandsService {
    pipeline: Arc<RequestPipeline>,
}

impl BrandsService {
    pub(crate) fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    /// Fetches a brand's profile together with one page of its products.
    ///
    /// `code` is the brand's URL code, `page` defaults to the first page.
    pub async fn get_brand_products(
        &self,
        code: &str,
        page: Option<u32>,
    ) -> Result<BrandProductsResponse> {
        let mut params = Map::new();
        params.insert("page".to_string(), Value::from(page.unwrap_or(1)));
        let endpoint = format!("/v1/brands/{code}/");
        self.pipeline.get(&endpoint, Some(params)).await
    }

    /// Fetches a brand's profile.
    ///
    /// Convenience for [`get_brand_products`](Self::get_brand_products) with
    /// the first page.
    pub async fn get_brand_info(&self, code: &str) -> Result<BrandProductsResponse> {
        self.get_brand_products(code, Some(1)).await
    }
}
