// ── Query intent ──
//
// What the user asked to see. Exactly one retrieval mode is active at a
// time; the tagged enum makes two simultaneously active inputs
// unrepresentable.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The active retrieval parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "kebab-case")]
pub enum QueryIntent {
    /// Browse one category, page by page.
    Category(String),
    /// Free-text fuzzy search on product names.
    Search(String),
    /// Direct lookup of a single barcode.
    Barcode(String),
}

impl QueryIntent {
    pub fn mode(&self) -> QueryMode {
        match self {
            Self::Category(_) => QueryMode::Category,
            Self::Search(_) => QueryMode::Search,
            Self::Barcode(_) => QueryMode::Barcode,
        }
    }

    /// The category name, search text, or barcode.
    pub fn value(&self) -> &str {
        match self {
            Self::Category(v) | Self::Search(v) | Self::Barcode(v) => v,
        }
    }

    pub fn is_barcode(&self) -> bool {
        matches!(self, Self::Barcode(_))
    }
}

/// Discriminant of [`QueryIntent`], for display and logging.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum QueryMode {
    Category,
    Search,
    Barcode,
}

/// Ordering applied to each fetched page.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    None,
    NameAsc,
    NameDesc,
    GradeAsc,
    GradeDesc,
}
