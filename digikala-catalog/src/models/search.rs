//! Search endpoint models.

use serde::{Deserialize, Serialize};

use super::common::{Pager, SortOption};
use super::product::Product;
use digikala_core::envelope::ApiResponse;

/// Payload of the catalog search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub products: Vec<Product>,
    pub pager: Pager,
    #[serde(default)]
    pub sort_options: Vec<SortOption>,
    #[serde(default)]
    pub did_you_mean: Vec<String>,
    #[serde(default)]
    pub related_search_words: Vec<String>,
    #[serde(default)]
    pub result_type: String,
    #[serde(default)]
    pub search_method: String,
}

/// Typed envelope returned by `search`.
pub type ProductSearchResponse = ApiResponse<SearchData>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_data_parses_with_products_and_pager() {
        let data: SearchData = serde_json::from_value(json!({
            "products": [
                {"id": 1, "title_fa": "لپ تاپ ایسوس", "status": "marketable"},
                {"id": 2, "title_fa": "لپ تاپ لنوو", "status": "out_of_stock"}
            ],
            "pager": {"current_page": 1, "total_pages": 14, "total_items": 270},
            "sort_options": [{"id": 22, "title_fa": "پرفروش‌ترین"}],
            "did_you_mean": [],
            "result_type": "default",
            "search_method": "lexical"
        }))
        .unwrap();

        assert_eq!(data.products.len(), 2);
        assert_eq!(data.products[0].title_fa, "لپ تاپ ایسوس");
        assert_eq!(data.pager.total_items, 270);
        assert_eq!(data.sort_options[0].id, 22);
        assert_eq!(data.search_method, "lexical");
    }

    #[test]
    fn test_search_data_tolerates_missing_product_list() {
        let data: SearchData = serde_json::from_value(json!({
            "pager": {"current_page": 1, "total_pages": 0, "total_items": 0}
        }))
        .unwrap();
        assert!(data.products.is_empty());
        assert_eq!(data.pager.total_pages, 0);
    }

    #[test]
    fn test_search_envelope_unwraps() {
        let envelope = json!({
            "status": 200,
            "data": {
                "products": [],
                "pager": {"current_page": 1, "total_pages": 1, "total_items": 3}
            }
        });
        let response = ProductSearchResponse::from_value(envelope).unwrap();
        assert_eq!(response.data.pager.total_items, 3);
    }
}
