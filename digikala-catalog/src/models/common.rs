//! Payload structures shared across endpoint responses.

use serde::{Deserialize, Serialize};

/// Link reference as the API represents it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Url {
    /// Origin the `uri` is relative to, when the API includes one.
    #[serde(default)]
    pub base: Option<String>,
    /// Path component of the link.
    #[serde(default)]
    pub uri: Option<String>,
}

/// A single image with its size variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: Vec<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub webp_url: Option<Vec<String>>,
}

/// Image set attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Images {
    /// Primary image shown in listings.
    pub main: Image,
    /// Gallery images, when present.
    #[serde(default)]
    pub list: Option<Vec<Image>>,
}

/// Color option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub hex_code: String,
}

/// Size option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub id: u64,
    pub title: String,
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// Price block. All monetary amounts are in Rials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub selling_price: u64,
    /// Recommended retail price, used to derive the displayed discount.
    pub rrp_price: u64,
    #[serde(default)]
    pub order_limit: u32,
    #[serde(default)]
    pub min_order_limit: u32,
    #[serde(default)]
    pub discount_percent: u32,
    #[serde(default)]
    pub is_incredible: bool,
    #[serde(default)]
    pub is_promotion: bool,
    #[serde(default)]
    pub is_locked_for_digiplus: bool,
    #[serde(default)]
    pub bnpl_active: bool,
    #[serde(default)]
    pub is_plus_early_access: bool,
    #[serde(default)]
    pub marketable_stock: Option<i64>,
}

/// Rating summary shown next to a seller in listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellerRating {
    #[serde(default)]
    pub total_rate: Option<i64>,
    #[serde(default)]
    pub total_count: Option<i64>,
    #[serde(default)]
    pub commitment: Option<f64>,
    #[serde(default)]
    pub no_return: Option<f64>,
    #[serde(default)]
    pub on_time_shipping: Option<f64>,
}

/// Seller grade badge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellerGrade {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub color: String,
}

/// Seller trust flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellerProperties {
    #[serde(default)]
    pub is_trusted: bool,
    #[serde(default)]
    pub is_official: bool,
    #[serde(default)]
    pub is_roosta: bool,
    #[serde(default)]
    pub is_new: bool,
}

/// Seller as embedded in a product variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub url: String,
    /// The API sends an empty array instead of an object for unrated sellers.
    #[serde(default, deserialize_with = "super::lenient")]
    pub rating: Option<SellerRating>,
    #[serde(default)]
    pub properties: SellerProperties,
    #[serde(default)]
    pub stars: Option<f64>,
    #[serde(default)]
    pub grade: SellerGrade,
    #[serde(default)]
    pub registration_date: String,
}

/// Warranty attached to a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warranty {
    pub id: u64,
    pub title_fa: String,
    #[serde(default)]
    pub title_en: String,
}

/// DigiPlus membership benefits on a product or variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigiPlus {
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub services_summary: Vec<String>,
    #[serde(default)]
    pub is_jet_eligible: bool,
    #[serde(default)]
    pub cash_back: i64,
    #[serde(default)]
    pub fast_shipping_text: Option<String>,
    #[serde(default)]
    pub is_digiplus: bool,
}

/// Price of one shipment option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentPrice {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub is_free: bool,
}

/// One shipment provider offered for a variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentProvider {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub has_lead_time: bool,
    #[serde(default)]
    pub price: Option<ShipmentPrice>,
    #[serde(default)]
    pub shipping_mode: String,
    #[serde(default)]
    pub delivery_day: String,
}

/// Shipment options for a variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentMethods {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub has_lead_time: bool,
    #[serde(default)]
    pub providers: Vec<ShipmentProvider>,
}

/// Marketing and logistics flags on a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default)]
    pub is_fast_shipping: bool,
    #[serde(default)]
    pub is_ship_by_seller: bool,
    #[serde(default)]
    pub free_shipping_badge: bool,
    #[serde(default)]
    pub is_multi_warehouse: bool,
    #[serde(default)]
    pub is_fake: bool,
    #[serde(default)]
    pub has_gift: bool,
    #[serde(default)]
    pub min_price_in_last_month: i64,
    #[serde(default)]
    pub is_non_inventory: bool,
    #[serde(default)]
    pub is_ad: bool,
    #[serde(default)]
    pub is_jet_eligible: bool,
    #[serde(default)]
    pub is_medical_supplement: bool,
    #[serde(default)]
    pub has_printed_price: Option<bool>,
}

/// Pagination block carried by every listing response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pager {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

/// One entry of the sort selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortOption {
    pub id: i64,
    pub title_fa: String,
}
