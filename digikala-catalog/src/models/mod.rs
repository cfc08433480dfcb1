//! Typed payload models for the storefront endpoints.
//!
//! Responses carry the load-bearing fields of the real API; fields the API
//! omits for some products are `Option` or defaulted, and decorative
//! analytics blocks are ignored entirely. Every payload slots into
//! [`digikala_core::envelope::ApiResponse`] as its `data` type.

pub mod brand;
pub mod common;
pub mod product;
pub mod search;
pub mod seller;

pub use brand::{BrandData, BrandDetail, BrandProductsResponse};
pub use common::{
    Color, DigiPlus, Image, Images, Pager, Price, Properties, Rating, Seller, SellerGrade,
    SellerProperties, SellerRating, ShipmentMethods, ShipmentPrice, ShipmentProvider, Size,
    SortOption, Url, Warranty,
};
pub use product::{
    ActiveProduct, Brand, Breadcrumb, Category, InactiveProduct, Product, ProductDetailData,
    ProductDetailResponse, ProductRecord, ProductVariant, ProsAndCons, Review, ReviewAttribute,
    Specification, SpecificationAttribute, Suggestion,
};
pub use search::{ProductSearchResponse, SearchData};
pub use seller::{
    SellerData, SellerDetail, SellerDetailRating, SellerProductListResponse, SellerStatistics,
};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a field the API sometimes sends in a degenerate shape, such
/// as an empty array where an object belongs. Anything that does not match
/// the expected type becomes `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
