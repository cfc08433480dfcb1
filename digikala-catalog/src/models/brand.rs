//! Brand endpoint models.

use serde::{Deserialize, Serialize};

use super::common::{Pager, SortOption};
use super::product::{Brand, Product};
use digikala_core::envelope::ApiResponse;

/// Brand profile with the long-form description shown on the brand page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandDetail {
    #[serde(flatten)]
    pub brand: Brand,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload of the brand products endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandData {
    pub brand: BrandDetail,
    #[serde(default)]
    pub products: Vec<Product>,
    pub pager: Pager,
    #[serde(default)]
    pub sort_options: Vec<SortOption>,
    #[serde(default)]
    pub did_you_mean: Vec<String>,
    #[serde(default)]
    pub result_type: String,
    #[serde(default)]
    pub search_method: String,
}

/// Typed envelope returned by `get_brand_products` and `get_brand_info`.
pub type BrandProductsResponse = ApiResponse<BrandData>;
