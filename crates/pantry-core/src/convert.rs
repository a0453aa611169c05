// ── API-to-domain type conversions ──
//
// Bridges raw `pantry_api` response types into canonical
// `pantry_core::model` types. Blank strings from the catalog are
// normalized to `None` so "absent" has one representation.

use pantry_api::types::{CategoryTag, ProductResponse};

use crate::model::{CategoryFacet, Product};

/// Drop empty or whitespace-only values.
fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

impl From<ProductResponse> for Product {
    fn from(p: ProductResponse) -> Self {
        Self {
            identifier: p.code,
            name: non_blank(p.product_name),
            categories: non_blank(p.categories),
            ingredients_text: non_blank(p.ingredients_text),
            nutrition_grade: non_blank(p.nutrition_grades).map(|g| g.to_lowercase()),
            quantity: non_blank(p.quantity),
            brands: non_blank(p.brands),
            manufacturing_places: non_blank(p.manufacturing_places),
            origins: non_blank(p.origins),
            labels: non_blank(p.labels),
            stores: non_blank(p.stores),
            countries: non_blank(p.countries),
            image_url: non_blank(p.image_url),
        }
    }
}

impl From<CategoryTag> for CategoryFacet {
    fn from(tag: CategoryTag) -> Self {
        Self {
            name: tag.name,
            product_count: tag.products,
        }
    }
}
