// Hand-crafted async HTTP client for the Open Food Facts read API.
//
// Four GET endpoints, all JSON, no authentication. Path segments are
// percent-encoded through `Url::path_segments_mut`, so category names and
// barcodes never need escaping by the caller.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    CategoryListResponse, ProductListResponse, ProductLookupResponse, ProductResponse,
};

/// Public catalog host used when no profile overrides it.
pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Raw page size requested from the text-search endpoint.
pub const SEARCH_PAGE_SIZE: u32 = 100;

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Open Food Facts catalog.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` using the given transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and strip any trailing slash from its path.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&path);
        url.set_query(None);
        Ok(url)
    }

    /// The catalog base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// One page of products in a category.
    pub async fn list_category(
        &self,
        category: &str,
        page: u32,
    ) -> Result<Vec<ProductResponse>, Error> {
        let url = self.url(&["category", category, &format!("{page}.json")])?;
        let list: ProductListResponse = self.get(url).await?;
        Ok(list.products)
    }

    /// One raw page of full-text search results.
    pub async fn search(&self, terms: &str, page: u32) -> Result<Vec<ProductResponse>, Error> {
        let url = self.url(&["cgi", "search.pl"])?;
        let list: ProductListResponse = self
            .get_with_params(
                url,
                &[
                    ("search_terms", terms.to_owned()),
                    ("page", page.to_string()),
                    ("page_size", SEARCH_PAGE_SIZE.to_string()),
                    ("json", "true".to_owned()),
                ],
            )
            .await?;
        Ok(list.products)
    }

    /// Look a product up by barcode.
    ///
    /// Returns `Ok(None)` when the catalog reports no such product, whether
    /// through `status: 0` in the body or an HTTP 404.
    pub async fn get_product(&self, code: &str) -> Result<Option<ProductResponse>, Error> {
        let url = self.url(&["api", "v0", "product", &format!("{code}.json")])?;
        match self.get::<ProductLookupResponse>(url).await {
            Ok(lookup) if lookup.status == Some(0) => Ok(None),
            Ok(lookup) => Ok(lookup.product),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The full category facet list.
    pub async fn list_categories(&self) -> Result<CategoryListResponse, Error> {
        let url = self.url(&["categories.json"])?;
        self.get(url).await
    }
}

/// First 200 characters of a response body, for error messages.
fn body_preview(body: &str) -> &str {
    body.char_indices()
        .nth(200)
        .map_or(body, |(idx, _)| &body[..idx])
}
