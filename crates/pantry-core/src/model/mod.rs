// ── Domain model ──
//
// Canonical catalog types consumed by the controller and the CLI.
// Wire-format names stay in `pantry_api::types`; `convert` bridges them.

pub mod product;
pub mod query;

pub use product::{CategoryFacet, Product};
pub use query::{QueryIntent, QueryMode, SortOrder};
