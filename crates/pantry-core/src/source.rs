// ── Catalog source seam ──
//
// The query client talks to the catalog through `CatalogSource` so the
// orchestration logic can run against an in-memory fake. The production
// implementation is `pantry_api::CatalogClient`.

use std::future::Future;

use pantry_api::CatalogClient;

use crate::error::CoreError;
use crate::model::{CategoryFacet, Product};

/// The four read operations of the catalog, in domain types.
pub trait CatalogSource: Send + Sync {
    /// One page of a category listing.
    fn category_page(
        &self,
        category: &str,
        page: u32,
    ) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;

    /// One raw, unfiltered page of text-search results.
    fn search_page(
        &self,
        terms: &str,
        page: u32,
    ) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;

    /// Exact barcode lookup; `Ok(None)` when the catalog has no such product.
    fn product(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Option<Product>, CoreError>> + Send;

    /// Every category facet, including empty ones.
    fn category_facets(&self) -> impl Future<Output = Result<Vec<CategoryFacet>, CoreError>> + Send;
}

impl CatalogSource for CatalogClient {
    async fn category_page(&self, category: &str, page: u32) -> Result<Vec<Product>, CoreError> {
        let raw = self.list_category(category, page).await?;
        Ok(raw.into_iter().map(Product::from).collect())
    }

    async fn search_page(&self, terms: &str, page: u32) -> Result<Vec<Product>, CoreError> {
        let raw = self.search(terms, page).await?;
        Ok(raw.into_iter().map(Product::from).collect())
    }

    async fn product(&self, identifier: &str) -> Result<Option<Product>, CoreError> {
        let raw = self.get_product(identifier).await?;
        Ok(raw.map(Product::from))
    }

    async fn category_facets(&self) -> Result<Vec<CategoryFacet>, CoreError> {
        let raw = self.list_categories().await?;
        Ok(raw.tags.into_iter().map(CategoryFacet::from).collect())
    }
}
