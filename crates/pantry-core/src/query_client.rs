// ── Query client ──
//
// Fail-soft front for the catalog: every operation returns `Fetched`,
// never an error, and raw text-search pages are memoized in an injected
// `SearchCache`.

use std::sync::Arc;
use std::time::Duration;

use pantry_api::{CatalogClient, TransportConfig};
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::error::CoreError;
use crate::model::Product;
use crate::request::{FetchKind, FetchRequest, FetchResponse, Fetched};
use crate::source::CatalogSource;
use crate::store::{Clock, SearchCache, SystemClock};

/// Client-side page size for fuzzy search results.
pub const FUZZY_PAGE_SIZE: usize = 20;

/// Fail-soft catalog operations with a memoized text search.
///
/// Cheaply cloneable; clones share the source and the cache, so a UI loop
/// can run requests on a spawned task.
pub struct QueryClient<S, C = SystemClock> {
    source: Arc<S>,
    cache: SearchCache<C>,
}

impl<S, C> Clone for QueryClient<S, C> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: self.cache.clone(),
        }
    }
}

impl QueryClient<CatalogClient> {
    /// Build a client for the catalog described by `config`.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = CatalogClient::new(config.base_url.as_str(), &transport)?;
        Ok(Self::new(client, config.cache_ttl))
    }
}

impl<S: CatalogSource> QueryClient<S> {
    /// Client with a fresh wall-clock cache.
    pub fn new(source: S, cache_ttl: Duration) -> Self {
        Self::with_cache(source, SearchCache::new(cache_ttl))
    }
}

impl<S: CatalogSource, C: Clock> QueryClient<S, C> {
    pub fn with_cache(source: S, cache: SearchCache<C>) -> Self {
        Self {
            source: Arc::new(source),
            cache,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &SearchCache<C> {
        &self.cache
    }

    // ── Operations ───────────────────────────────────────────────────

    /// One page of a category. Not cached.
    pub async fn fetch_by_category(&self, category: &str, page: u32) -> Fetched<Vec<Product>> {
        settle(
            "fetch_by_category",
            self.source.category_page(category, page).await,
        )
    }

    /// One raw text-search page, served from the cache while fresh.
    pub async fn search_by_text(&self, text: &str, page: u32) -> Fetched<Vec<Product>> {
        self.raw_search(text, page)
            .await
            .map(|products| Vec::clone(&products))
    }

    /// Case-insensitive name filter over raw search page 1, paginated
    /// client-side in pages of [`FUZZY_PAGE_SIZE`].
    ///
    /// Empty `text` returns raw page 1 whole, unfiltered and unsliced.
    /// Never issues more than one network call: deeper pages re-filter the
    /// same cached superset, so matches beyond raw page 1 are unreachable.
    pub async fn fuzzy_search_by_text(&self, text: &str, page: u32) -> Fetched<Vec<Product>> {
        self.raw_search(text, 1).await.map(|raw| {
            if text.is_empty() {
                return Vec::clone(&raw);
            }
            let needle = text.to_lowercase();
            raw.iter()
                .filter(|p| p.name_contains(&needle))
                .skip(page_offset(page))
                .take(FUZZY_PAGE_SIZE)
                .cloned()
                .collect()
        })
    }

    /// Exact barcode lookup. `Data(None)` means the catalog has no such product.
    pub async fn fetch_by_identifier(&self, identifier: &str) -> Fetched<Option<Product>> {
        settle("fetch_by_identifier", self.source.product(identifier).await)
    }

    /// Names of all categories that contain at least one product.
    pub async fn list_category_names(&self) -> Fetched<Vec<String>> {
        settle("list_category_names", self.source.category_facets().await).map(|facets| {
            facets
                .into_iter()
                .filter(|facet| facet.product_count > 0)
                .map(|facet| facet.name)
                .collect()
        })
    }

    /// Run the operation a controller request asks for.
    pub async fn execute(&self, request: &FetchRequest) -> FetchResponse {
        match &request.kind {
            FetchKind::Category { name } => {
                FetchResponse::Products(self.fetch_by_category(name, request.page).await)
            }
            FetchKind::Search { text } => {
                FetchResponse::Products(self.fuzzy_search_by_text(text, request.page).await)
            }
            FetchKind::Barcode { code } => {
                FetchResponse::Product(self.fetch_by_identifier(code).await)
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn raw_search(&self, text: &str, page: u32) -> Fetched<Arc<Vec<Product>>> {
        if let Some(hit) = self.cache.get(text, page) {
            debug!(text, page, count = hit.len(), "search cache hit");
            return Fetched::Data(hit);
        }

        debug!(text, page, "search cache miss");
        settle("search_by_text", self.source.search_page(text, page).await)
            .map(|products| self.cache.insert(text, page, products))
    }
}

/// Log a failed operation and fold it into `Fetched`.
fn settle<T>(operation: &'static str, result: Result<T, CoreError>) -> Fetched<T> {
    match result {
        Ok(data) => Fetched::Data(data),
        Err(err) => {
            warn!(operation, error = %err, "catalog request failed, degrading to no results");
            Fetched::Failed(err.to_string())
        }
    }
}

/// Index of the first item of a 1-based fuzzy page.
fn page_offset(page: u32) -> usize {
    usize::try_from(page.saturating_sub(1))
        .unwrap_or(usize::MAX)
        .saturating_mul(FUZZY_PAGE_SIZE)
}
