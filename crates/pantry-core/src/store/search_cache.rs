// ── Raw text-search cache ──
//
// Memoizes unfiltered search pages keyed by `(terms, page)`. Entries
// expire lazily: a stale entry is dropped when it is next read, and
// nothing sweeps the map in the background.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::trace;

use super::clock::{Clock, SystemClock};
use crate::model::Product;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    terms: String,
    page: u32,
}

impl CacheKey {
    fn new(terms: &str, page: u32) -> Self {
        Self {
            terms: terms.to_owned(),
            page,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    products: Arc<Vec<Product>>,
    stored_at: Instant,
}

/// Owned, injectable cache for raw search responses.
///
/// Cheaply cloneable; clones share entries. Unbounded in entry count,
/// which is acceptable for a process-lifetime cache.
pub struct SearchCache<C = SystemClock> {
    entries: Arc<DashMap<CacheKey, CacheEntry>>,
    clock: Arc<C>,
    ttl: Duration,
}

impl<C> Clone for SearchCache<C> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            clock: Arc::clone(&self.clock),
            ttl: self.ttl,
        }
    }
}

impl SearchCache<SystemClock> {
    /// Cache on the wall clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> SearchCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock: Arc::new(clock),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh entry for `(terms, page)`, if any.
    pub fn get(&self, terms: &str, page: u32) -> Option<Arc<Vec<Product>>> {
        let key = CacheKey::new(terms, page);
        let now = self.clock.now();

        {
            let entry = self.entries.get(&key)?;
            if self.is_fresh(&entry, now) {
                return Some(Arc::clone(&entry.products));
            }
        }

        // The read guard must be released before removing from the same shard.
        self.entries
            .remove_if(&key, |_, entry| !self.is_fresh(entry, now));
        trace!(terms, page, "dropped stale search cache entry");
        None
    }

    /// Store a raw response, stamped with the current time.
    pub fn insert(&self, terms: &str, page: u32, products: Vec<Product>) -> Arc<Vec<Product>> {
        let products = Arc::new(products);
        self.entries.insert(
            CacheKey::new(terms, page),
            CacheEntry {
                products: Arc::clone(&products),
                stored_at: self.clock.now(),
            },
        );
        products
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) < self.ttl
    }
}
