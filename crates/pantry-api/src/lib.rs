// pantry-api: Async Rust client for the Open Food Facts read API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{CatalogClient, DEFAULT_BASE_URL, SEARCH_PAGE_SIZE};
pub use error::Error;
pub use transport::TransportConfig;
