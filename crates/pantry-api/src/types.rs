//! Response types for the Open Food Facts read endpoints.
//!
//! Field names follow the catalog's snake_case wire format. Only the
//! fields the browser displays are modeled; everything else is ignored.

use serde::{Deserialize, Serialize};

// ── Products ─────────────────────────────────────────────────────────

/// One product record as returned inside list and lookup responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    /// Barcode. Some list entries omit it.
    #[serde(default)]
    pub code: String,
    pub product_name: Option<String>,
    pub categories: Option<String>,
    pub ingredients_text: Option<String>,
    /// Nutri-Score letter, lowercase (`a`..`e`), or values like `unknown`.
    pub nutrition_grades: Option<String>,
    pub quantity: Option<String>,
    pub brands: Option<String>,
    pub manufacturing_places: Option<String>,
    pub origins: Option<String>,
    pub labels: Option<String>,
    pub stores: Option<String>,
    pub countries: Option<String>,
    pub image_url: Option<String>,
}

/// Product list from `GET /category/{category}/{page}.json` and
/// `GET /cgi/search.pl?...&json=true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListResponse {
    #[serde(default)]
    pub products: Vec<ProductResponse>,
}

/// Single product lookup from `GET /api/v0/product/{code}.json`.
///
/// A missing product is reported with `status: 0` and no `product` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLookupResponse {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub product: Option<ProductResponse>,
}

// ── Categories ───────────────────────────────────────────────────────

/// Category facet entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTag {
    pub name: String,
    /// Number of products in the category.
    #[serde(default)]
    pub products: u64,
}

/// Category facet list from `GET /categories.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryListResponse {
    #[serde(default)]
    pub tags: Vec<CategoryTag>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn list_without_products_key_is_empty() {
        let resp: ProductListResponse = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(resp.products.is_empty());
    }

    #[test]
    fn product_fields_are_optional() {
        let resp: ProductListResponse =
            serde_json::from_str(r#"{"products": [{"code": "123"}, {}]}"#).unwrap();
        assert_eq!(resp.products.len(), 2);
        assert_eq!(resp.products[0].code, "123");
        assert!(resp.products[0].product_name.is_none());
        assert_eq!(resp.products[1].code, "");
    }

    #[test]
    fn lookup_without_product_deserializes() {
        let resp: ProductLookupResponse = serde_json::from_str(
            r#"{"code": "000000000000", "status": 0, "status_verbose": "product not found"}"#,
        )
        .unwrap();
        assert_eq!(resp.status, Some(0));
        assert!(resp.product.is_none());
    }
}
