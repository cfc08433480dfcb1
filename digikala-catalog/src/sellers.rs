//! Seller endpoints.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::models::SellerProductListResponse;
use digikala_core::error::Result;
use digikala_core::pipeline::RequestPipeline;

/// Seller-related API operations.
#[derive(Debug, Clone)]
pub struct SellersService {
    pipeline: Arc<RequestPipeline>,
}

impl SellersService {
    pub(crate) fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    /// Fetches a seller's profile together with one page of their products.
    ///
    /// `sku` is the seller's public code, `page` defaults to the first page.
    pub async fn get_seller_products(
        &self,
        sku: &str,
        page: Option<u32>,
    ) -> Result<SellerProductListResponse> {
        let mut params = Map::new();
        params.insert("page".to_string(), Value::from(page.unwrap_or(1)));
        let endpoint = format!("/v1/sellers/{sku}/");
        self.pipeline.get(&endpoint, Some(params)).await
    }

    /// Fetches a seller's profile.
    ///
    /// Convenience for [`get_seller_products`](Self::get_seller_products)
    /// with the first page.
    pub async fn get_seller_info(&self, sku: &str) -> Result<SellerProductListResponse> {
        self.get_seller_products(sku, Some(1)).await
    }
}
