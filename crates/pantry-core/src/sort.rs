// ── Result ordering ──

use std::cmp::Ordering;

use crate::model::{Product, SortOrder};

/// Order one page of products.
///
/// `SortOrder::None` keeps catalog order. The other orders are stable and
/// treat an absent name or grade as the empty string.
pub fn sort_products(mut products: Vec<Product>, order: SortOrder) -> Vec<Product> {
    match order {
        SortOrder::None => {}
        SortOrder::NameAsc => products.sort_by(|a, b| collate(a.name_or_empty(), b.name_or_empty())),
        SortOrder::NameDesc => products.sort_by(|a, b| collate(b.name_or_empty(), a.name_or_empty())),
        SortOrder::GradeAsc => {
            products.sort_by(|a, b| collate(a.grade_or_empty(), b.grade_or_empty()));
        }
        SortOrder::GradeDesc => {
            products.sort_by(|a, b| collate(b.grade_or_empty(), a.grade_or_empty()));
        }
    }
    products
}

/// Case-insensitive comparison. Names that differ only in case put the
/// lowercase spelling first, so the order is total.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
