// In-memory `CatalogSource` for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::CoreError;
use crate::model::{CategoryFacet, Product};
use crate::source::CatalogSource;

#[derive(Default)]
pub(crate) struct FakeCatalog {
    category_pages: HashMap<(String, u32), Vec<Product>>,
    search_pages: HashMap<(String, u32), Vec<Product>>,
    products: HashMap<String, Product>,
    facets: Vec<CategoryFacet>,
    failing: AtomicBool,
    calls: Mutex<Vec<String>>,
}

pub(crate) fn product(identifier: &str, name: Option<&str>, grade: Option<&str>) -> Product {
    Product {
        identifier: identifier.into(),
        name: name.map(String::from),
        nutrition_grade: grade.map(String::from),
        ..Product::default()
    }
}

/// `count` products named `"{prefix} {n}"` with identifiers `"{prefix}-{n}"`.
pub(crate) fn numbered(prefix: &str, count: usize) -> Vec<Product> {
    (0..count)
        .map(|n| {
            product(
                &format!("{prefix}-{n}"),
                Some(&format!("{prefix} {n:03}")),
                None,
            )
        })
        .collect()
}

impl FakeCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_category(mut self, name: &str, page: u32, products: Vec<Product>) -> Self {
        self.category_pages.insert((name.into(), page), products);
        self
    }

    pub(crate) fn with_search(mut self, terms: &str, page: u32, products: Vec<Product>) -> Self {
        self.search_pages.insert((terms.into(), page), products);
        self
    }

    pub(crate) fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.identifier.clone(), product);
        self
    }

    pub(crate) fn with_facet(mut self, name: &str, product_count: u64) -> Self {
        self.facets.push(CategoryFacet {
            name: name.into(),
            product_count,
        });
        self
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of recorded calls whose description starts with `prefix`.
    pub(crate) fn calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) -> Result<(), CoreError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::ServiceUnavailable {
                url: "fake://catalog".into(),
                reason: "HTTP 503".into(),
            });
        }
        Ok(())
    }
}

impl CatalogSource for FakeCatalog {
    async fn category_page(&self, category: &str, page: u32) -> Result<Vec<Product>, CoreError> {
        self.record(format!("category:{category}:{page}"))?;
        Ok(self
            .category_pages
            .get(&(category.to_owned(), page))
            .cloned()
            .unwrap_or_default())
    }

    async fn search_page(&self, terms: &str, page: u32) -> Result<Vec<Product>, CoreError> {
        self.record(format!("search:{terms}:{page}"))?;
        Ok(self
            .search_pages
            .get(&(terms.to_owned(), page))
            .cloned()
            .unwrap_or_default())
    }

    async fn product(&self, identifier: &str) -> Result<Option<Product>, CoreError> {
        self.record(format!("product:{identifier}"))?;
        Ok(self.products.get(identifier).cloned())
    }

    async fn category_facets(&self) -> Result<Vec<CategoryFacet>, CoreError> {
        self.record("facets".into())?;
        Ok(self.facets.clone())
    }
}
