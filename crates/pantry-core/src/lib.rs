//! Query orchestration between `pantry-api` and the rendering layer.
//!
//! This crate owns the domain model and the logic that turns user input
//! into catalog requests:
//!
//! - **[`QueryClient`]**: fail-soft catalog operations. Every call returns
//!   [`Fetched`], so a dead service reads as "no results" unless the caller
//!   asks why. Raw text-search pages are memoized in a [`SearchCache`] with
//!   a pluggable [`Clock`].
//!
//! - **[`ResultController`]**: the query intent state machine. Input events
//!   yield generation-tagged [`FetchRequest`]s; responses are folded back in
//!   with [`apply`](ResultController::apply), which discards anything stale.
//!   The current [`CatalogView`] is published on a `tokio::sync::watch`
//!   channel.
//!
//! - **[`CatalogSource`]**: the seam to the HTTP client, implemented for
//!   [`pantry_api::CatalogClient`].

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod query_client;
pub mod request;
pub mod sort;
pub mod source;
pub mod store;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_CACHE_TTL, DEFAULT_CATEGORY};
pub use controller::{CatalogView, InputEvent, ResultController, ResultState};
pub use error::CoreError;
pub use query_client::{FUZZY_PAGE_SIZE, QueryClient};
pub use request::{FetchKind, FetchRequest, FetchResponse, Fetched};
pub use sort::sort_products;
pub use source::CatalogSource;
pub use store::{Clock, ManualClock, SearchCache, SystemClock};

pub use model::{CategoryFacet, Product, QueryIntent, QueryMode, SortOrder};
