// ── Fetch requests ──
//
// A `FetchRequest` is what the controller wants fetched, tagged with the
// intent generation that was current when it was issued. The matching
// `FetchResponse` comes back through `ResultController::apply`.

use serde::{Deserialize, Serialize};

use crate::model::Product;

/// Outcome of a fail-soft catalog operation.
///
/// `Failed` carries a human-readable reason. Callers that only want the
/// degraded value use [`Fetched::into_data`], which turns a failure into
/// an empty list or an absent product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fetched<T> {
    Data(T),
    Failed(String),
}

impl<T> Fetched<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The failure reason, if the operation failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Data(_) => None,
            Self::Failed(reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Self::Data(data) => Fetched::Data(f(data)),
            Self::Failed(reason) => Fetched::Failed(reason),
        }
    }
}

impl<T: Default> Fetched<T> {
    /// The data, or its empty default on failure.
    pub fn into_data(self) -> T {
        match self {
            Self::Data(data) => data,
            Self::Failed(_) => T::default(),
        }
    }
}

/// Which catalog operation a request needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FetchKind {
    Category { name: String },
    Search { text: String },
    Barcode { code: String },
}

/// One fetch issued by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Intent generation at issue time.
    pub generation: u64,
    /// 1-based page (always 1 for barcode lookups).
    pub page: u32,
    pub kind: FetchKind,
}

/// Result of executing a [`FetchRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResponse {
    Products(Fetched<Vec<Product>>),
    Product(Fetched<Option<Product>>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_degrades_to_empty() {
        let fetched: Fetched<Vec<Product>> = Fetched::Failed("HTTP 503".into());
        assert!(fetched.is_failed());
        assert_eq!(fetched.failure(), Some("HTTP 503"));
        assert!(fetched.into_data().is_empty());

        let lookup: Fetched<Option<Product>> = Fetched::Failed("timeout".into());
        assert!(lookup.into_data().is_none());
    }

    #[test]
    fn map_preserves_failure() {
        let ok: Fetched<u32> = Fetched::Data(2);
        assert_eq!(ok.map(|n| n * 2), Fetched::Data(4));

        let failed: Fetched<u32> = Fetched::Failed("down".into());
        assert_eq!(failed.map(|n| n * 2), Fetched::Failed("down".into()));
    }
}
