// ── Runtime catalog configuration ──
//
// Describes *where* the catalog lives and how the query layer behaves.
// Never touches disk: the CLI builds a `CatalogConfig` (usually through
// `pantry-config`) and hands it in.

use std::time::Duration;

use url::Url;

pub use pantry_api::DEFAULT_BASE_URL;

/// Category shown before the user picks one.
pub const DEFAULT_CATEGORY: &str = "snacks";

/// How long a raw text-search page stays fresh in the cache.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Configuration for one catalog instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog root (e.g., `https://world.openfoodfacts.org`).
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// Category browsed on startup.
    pub default_category: String,
    /// Search cache time-to-live.
    pub cache_ttl: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL
                .parse()
                .expect("default base URL is valid"),
            timeout: Duration::from_secs(30),
            default_category: DEFAULT_CATEGORY.into(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}
