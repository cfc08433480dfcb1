//! Product detail and listing models.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::common::{
    Color, DigiPlus, Images, Price, Properties, Rating, Seller, ShipmentMethods, Size, Url,
    Warranty,
};
use digikala_core::envelope::ApiResponse;

/// Brand summary embedded in products and listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: u64,
    pub code: String,
    pub title_fa: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub url: Option<Url>,
    #[serde(default)]
    pub visibility: bool,
    #[serde(default, deserialize_with = "super::lenient")]
    pub logo: Option<super::common::Image>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_miscellaneous: bool,
}

/// Category the product is filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub title_fa: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub content_description: String,
    #[serde(default)]
    pub return_reason_alert: Option<String>,
}

/// The variant preselected in the buy box.
///
/// Also used for the entries of the `variants` list on a product detail,
/// which carry the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: u64,
    #[serde(default)]
    pub lead_time: i64,
    #[serde(default)]
    pub rank: f64,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub digiplus: Option<DigiPlus>,
    #[serde(default)]
    pub warranty: Option<Warranty>,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub size: Option<Size>,
    pub seller: Seller,
    pub price: Price,
    #[serde(default)]
    pub shipment_methods: Option<ShipmentMethods>,
    #[serde(default)]
    pub has_importer_price: bool,
    #[serde(default)]
    pub has_best_price_in_last_month: bool,
}

/// Specification highlights surfaced in the review block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAttribute {
    pub title: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Editorial review block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub attributes: Vec<ReviewAttribute>,
}

/// Community-sourced advantages and disadvantages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProsAndCons {
    #[serde(default)]
    pub advantages: Vec<String>,
    #[serde(default)]
    pub disadvantages: Vec<String>,
}

/// Share of buyers recommending the product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub count: u64,
    pub percentage: f64,
}

/// Breadcrumb navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub title: String,
    #[serde(default)]
    pub url: Option<Url>,
}

/// One attribute row of a specification group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecificationAttribute {
    pub title: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Named group of technical specifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    pub title: String,
    #[serde(default)]
    pub attributes: Vec<SpecificationAttribute>,
}

/// Product as it appears in search and listing responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title_fa: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub url: Option<Url>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub images: Option<Images>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub digiplus: Option<DigiPlus>,
    /// The API sends an empty array when no variant is purchasable.
    #[serde(default, deserialize_with = "super::lenient")]
    pub default_variant: Option<ProductVariant>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub second_default_variant: Option<ProductVariant>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

/// Stub returned for delisted products.
///
/// Only the `is_inactive` flag is guaranteed; anything else is a bonus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InactiveProduct {
    pub is_inactive: bool,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title_fa: Option<String>,
}

/// Full product record for an active listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveProduct {
    #[serde(default)]
    pub is_inactive: bool,
    pub id: u64,
    pub title_fa: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub url: Option<Url>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub images: Option<Images>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub digiplus: Option<DigiPlus>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub default_variant: Option<ProductVariant>,
    #[serde(default, deserialize_with = "super::lenient")]
    pub second_default_variant: Option<ProductVariant>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub brand: Option<Brand>,
    #[serde(default)]
    pub review: Option<Review>,
    #[serde(default)]
    pub pros_and_cons: Option<ProsAndCons>,
    #[serde(default)]
    pub suggestion: Option<Suggestion>,
    #[serde(default)]
    pub questions_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub breadcrumb: Vec<Breadcrumb>,
    #[serde(default)]
    pub specifications: Vec<Specification>,
    #[serde(default)]
    pub has_size_guide: bool,
    #[serde(default = "default_show_type")]
    pub show_type: String,
    #[serde(default)]
    pub properties: Option<Properties>,
}

fn default_show_type() -> String {
    "normal".to_string()
}

/// Product payload of the detail endpoint.
///
/// Delisted products come back as a bare `{"is_inactive": true}` stub, so
/// the discriminant has to be read before the active shape is validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductRecord {
    /// Fully described, purchasable product.
    Active(Box<ActiveProduct>),
    /// Delisted stub.
    Inactive(InactiveProduct),
}

impl ProductRecord {
    /// Whether this record is a delisted stub.
    pub fn is_inactive(&self) -> bool {
        matches!(self, Self::Inactive(_))
    }

    /// The full record, when the product is active.
    pub fn as_active(&self) -> Option<&ActiveProduct> {
        match self {
            Self::Active(product) => Some(product),
            Self::Inactive(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for ProductRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let inactive = value
            .get("is_inactive")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if inactive {
            serde_json::from_value(value)
                .map(Self::Inactive)
                .map_err(DeError::custom)
        } else {
            serde_json::from_value(value)
                .map(|product| Self::Active(Box::new(product)))
                .map_err(DeError::custom)
        }
    }
}

/// Payload of the product detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetailData {
    pub product: ProductRecord,
}

/// Typed envelope returned by `get_product` and `get_fresh_product`.
pub type ProductDetailResponse = ApiResponse<ProductDetailData>;
