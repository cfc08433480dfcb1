//! Seller endpoint models.

use serde::{Deserialize, Serialize};

use super::common::{Image, Pager, SellerGrade, SellerProperties, SortOption};
use super::product::Product;
use digikala_core::envelope::ApiResponse;

/// Satisfaction breakdown for a seller page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellerDetailRating {
    #[serde(default)]
    pub total_rate: Option<i64>,
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// Operational performance numbers, in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellerStatistics {
    #[serde(default)]
    pub ship_on_time: Option<f64>,
    #[serde(default)]
    pub cancellation: Option<f64>,
    /// `return` is a reserved word, hence the rename.
    #[serde(rename = "return", default)]
    pub return_rate: Option<f64>,
}

/// Seller profile as shown on the seller page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub stars: Option<f64>,
    #[serde(default)]
    pub registration_date: String,
    #[serde(default, deserialize_with = "super::lenient")]
    pub grade: Option<SellerGrade>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub icon: Option<Image>,
    #[serde(default)]
    pub rating: Option<SellerDetailRating>,
    #[serde(default)]
    pub statistics: Option<SellerStatistics>,
    #[serde(default)]
    pub properties: Option<SellerProperties>,
}

/// Payload of the seller products endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerData {
    pub seller: SellerDetail,
    #[serde(default)]
    pub products: Vec<Product>,
    pub pager: Pager,
    #[serde(default)]
    pub sort_options: Vec<SortOption>,
    #[serde(default)]
    pub result_type: String,
}

/// Typed envelope returned by `get_seller_products` and `get_seller_info`.
pub type SellerProductListResponse = ApiResponse<SellerData>;
