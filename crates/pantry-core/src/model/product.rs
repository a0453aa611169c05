use serde::{Deserialize, Serialize};

/// One catalog item.
///
/// An immutable snapshot: the core only reorders and filters collections
/// of products, never edits one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Barcode, unique across the catalog.
    pub identifier: String,
    pub name: Option<String>,
    pub categories: Option<String>,
    pub ingredients_text: Option<String>,
    /// Nutri-Score letter, lowercase `a` (best) to `e` (worst).
    pub nutrition_grade: Option<String>,
    pub quantity: Option<String>,
    pub brands: Option<String>,
    pub manufacturing_places: Option<String>,
    pub origins: Option<String>,
    pub labels: Option<String>,
    pub stores: Option<String>,
    pub countries: Option<String>,
    pub image_url: Option<String>,
}

impl Product {
    /// Display name, empty when the catalog has none.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Nutrition grade, empty when the catalog has none.
    pub fn grade_or_empty(&self) -> &str {
        self.nutrition_grade.as_deref().unwrap_or_default()
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `needle_lower` must already be lowercase. Products without a name
    /// never match.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(needle_lower))
    }
}

/// A category from the facet list, with its product count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFacet {
    pub name: String,
    pub product_count: u64,
}
