// ── Result controller ──
//
// Owns the query intent and the derived result state. Events produce
// generation-tagged `FetchRequest`s; responses come back through `apply`,
// which drops anything issued under an older generation. Every state
// change publishes a fresh `CatalogView` on a watch channel.

use std::sync::Arc;

use pantry_api::CatalogClient;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::error::CoreError;
use crate::model::{Product, QueryIntent, SortOrder};
use crate::query_client::QueryClient;
use crate::request::{FetchKind, FetchRequest, FetchResponse, Fetched};
use crate::sort::sort_products;
use crate::source::CatalogSource;
use crate::store::{Clock, SystemClock};

/// Display-ready outcome of the current intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultState {
    /// Every page fetched so far for the intent, each page sorted.
    pub accumulated_products: Vec<Product>,
    /// Whether another page may exist.
    pub has_more: bool,
    /// Barcode mode only.
    pub single_barcode_result: Option<Product>,
    pub is_loading: bool,
    /// Failure reason of the last applied fetch.
    pub last_error: Option<String>,
    /// Barcode mode only: the lookup completed and found nothing.
    pub not_found: bool,
}

impl Default for ResultState {
    fn default() -> Self {
        Self {
            accumulated_products: Vec::new(),
            has_more: true,
            single_barcode_result: None,
            is_loading: false,
            last_error: None,
            not_found: false,
        }
    }
}

/// Snapshot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub intent: QueryIntent,
    pub sort_order: SortOrder,
    pub page: u32,
    #[serde(flatten)]
    pub results: ResultState,
    pub categories: Vec<String>,
    /// Whether a `load_more` would be accepted right now.
    pub can_load_more: bool,
}

/// User input, for consumers that prefer a single entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    SearchText(String),
    Barcode(String),
    Category(String),
    Sort(SortOrder),
    LoadMore,
}

/// Intent state machine over a [`QueryClient`].
pub struct ResultController<S, C = SystemClock> {
    client: QueryClient<S, C>,
    intent: QueryIntent,
    /// Category restored when search or barcode input is cleared.
    last_category: String,
    sort_order: SortOrder,
    page: u32,
    generation: u64,
    state: ResultState,
    categories: Vec<String>,
    view_tx: watch::Sender<Arc<CatalogView>>,
}

impl ResultController<CatalogClient> {
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CoreError> {
        let client = QueryClient::from_config(config)?;
        Ok(Self::new(client, &config.default_category))
    }
}

impl<S: CatalogSource, C: Clock> ResultController<S, C> {
    /// Controller in category mode on `default_category`. Nothing is fetched
    /// until [`refresh`](Self::refresh) or an input event.
    pub fn new(client: QueryClient<S, C>, default_category: &str) -> Self {
        let intent = QueryIntent::Category(default_category.to_owned());
        let state = ResultState::default();
        let (view_tx, _) = watch::channel(Arc::new(CatalogView {
            intent: intent.clone(),
            sort_order: SortOrder::None,
            page: 1,
            results: state.clone(),
            categories: Vec::new(),
            can_load_more: false,
        }));

        Self {
            client,
            intent,
            last_category: default_category.to_owned(),
            sort_order: SortOrder::None,
            page: 1,
            generation: 0,
            state,
            categories: Vec::new(),
            view_tx,
        }
    }

    /// Start with `order` instead of catalog order.
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self.publish();
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn client(&self) -> &QueryClient<S, C> {
        &self.client
    }

    pub fn intent(&self) -> &QueryIntent {
        &self.intent
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Generation of the most recently issued request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &ResultState {
        &self.state
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn can_load_more(&self) -> bool {
        !self.intent.is_barcode() && !self.state.is_loading && self.state.has_more
    }

    /// Current view (cheap `Arc` clone).
    pub fn view(&self) -> Arc<CatalogView> {
        self.view_tx.borrow().clone()
    }

    /// Subscribe to view changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<CatalogView>> {
        self.view_tx.subscribe()
    }

    // ── Input events ─────────────────────────────────────────────────

    /// Re-run the current intent from page 1.
    pub fn refresh(&mut self) -> FetchRequest {
        self.reset_results();
        self.issue()
    }

    /// Switch to fuzzy search. Empty text returns to the last category.
    pub fn set_search_text(&mut self, text: &str) -> FetchRequest {
        if text.is_empty() {
            return self.enter(QueryIntent::Category(self.last_category.clone()));
        }
        self.enter(QueryIntent::Search(text.to_owned()))
    }

    /// Switch to barcode lookup. An empty barcode returns to the last category.
    pub fn set_barcode(&mut self, code: &str) -> FetchRequest {
        if code.is_empty() {
            return self.enter(QueryIntent::Category(self.last_category.clone()));
        }
        self.enter(QueryIntent::Barcode(code.to_owned()))
    }

    /// Switch to category browsing. An empty name is ignored.
    pub fn select_category(&mut self, name: &str) -> Option<FetchRequest> {
        if name.is_empty() {
            debug!("ignoring empty category selection");
            return None;
        }
        self.last_category = name.to_owned();
        Some(self.enter(QueryIntent::Category(name.to_owned())))
    }

    /// Change the order and restart the listing from page 1.
    ///
    /// In barcode mode the single result is unaffected, so nothing is fetched.
    pub fn set_sort_order(&mut self, order: SortOrder) -> Option<FetchRequest> {
        self.sort_order = order;
        if self.intent.is_barcode() {
            self.publish();
            return None;
        }
        self.page = 1;
        self.state.accumulated_products.clear();
        self.state.has_more = true;
        Some(self.issue())
    }

    /// Request the next page, if the current state allows it.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if !self.can_load_more() {
            debug!(
                mode = %self.intent.mode(),
                loading = self.state.is_loading,
                has_more = self.state.has_more,
                "load more ignored"
            );
            return None;
        }
        self.page += 1;
        Some(self.issue())
    }

    /// Map an [`InputEvent`] onto the matching setter.
    pub fn handle(&mut self, event: InputEvent) -> Option<FetchRequest> {
        match event {
            InputEvent::SearchText(text) => Some(self.set_search_text(&text)),
            InputEvent::Barcode(code) => Some(self.set_barcode(&code)),
            InputEvent::Category(name) => self.select_category(&name),
            InputEvent::Sort(order) => self.set_sort_order(order),
            InputEvent::LoadMore => self.load_more(),
        }
    }

    // ── Responses ────────────────────────────────────────────────────

    /// Fold a response into the result state.
    ///
    /// Returns `false` when the response was discarded: it belongs to an
    /// older generation, or its shape does not match the request.
    pub fn apply(&mut self, request: &FetchRequest, response: FetchResponse) -> bool {
        if request.generation != self.generation {
            debug!(
                stale = request.generation,
                current = self.generation,
                "discarding stale response"
            );
            return false;
        }

        match (&request.kind, response) {
            (FetchKind::Category { .. } | FetchKind::Search { .. }, FetchResponse::Products(page)) => {
                self.apply_page(request.page, page);
            }
            (FetchKind::Barcode { .. }, FetchResponse::Product(lookup)) => {
                self.apply_lookup(lookup);
            }
            (kind, _) => {
                warn!(?kind, "response kind does not match request, keeping previous results");
                self.state.is_loading = false;
                self.publish();
                return false;
            }
        }

        self.state.is_loading = false;
        self.publish();
        true
    }

    /// Handle an event, run its request, and apply the response.
    pub async fn dispatch(&mut self, event: InputEvent) {
        if let Some(request) = self.handle(event) {
            self.run(request).await;
        }
    }

    /// Execute `request` on this controller's client and apply the result.
    pub async fn run(&mut self, request: FetchRequest) -> bool {
        let response = self.client.execute(&request).await;
        self.apply(&request, response)
    }

    /// Populate the category list. On failure the list stays as it was.
    pub async fn load_categories(&mut self) -> &[String] {
        match self.client.list_category_names().await {
            Fetched::Data(names) => {
                self.categories = names;
                self.publish();
            }
            Fetched::Failed(reason) => {
                debug!(%reason, "category list unavailable");
            }
        }
        &self.categories
    }

    // ── Internals ────────────────────────────────────────────────────

    fn enter(&mut self, intent: QueryIntent) -> FetchRequest {
        debug!(mode = %intent.mode(), value = intent.value(), "query intent changed");
        self.intent = intent;
        self.reset_results();
        self.issue()
    }

    fn reset_results(&mut self) {
        self.page = 1;
        self.state = ResultState::default();
    }

    /// Bump the generation and describe the fetch for the current intent.
    fn issue(&mut self) -> FetchRequest {
        self.generation += 1;
        self.state.is_loading = true;
        let kind = match &self.intent {
            QueryIntent::Category(name) => FetchKind::Category { name: name.clone() },
            QueryIntent::Search(text) => FetchKind::Search { text: text.clone() },
            QueryIntent::Barcode(code) => FetchKind::Barcode { code: code.clone() },
        };
        self.publish();
        FetchRequest {
            generation: self.generation,
            page: self.page,
            kind,
        }
    }

    fn apply_page(&mut self, page: u32, fetched: Fetched<Vec<Product>>) {
        self.state.last_error = fetched.failure().map(str::to_owned);
        let products = fetched.into_data();
        if products.is_empty() {
            self.state.has_more = false;
            return;
        }

        let sorted = sort_products(products, self.sort_order);
        if page == 1 {
            self.state.accumulated_products = sorted;
        } else {
            self.state.accumulated_products.extend(sorted);
        }
        self.state.has_more = true;
    }

    fn apply_lookup(&mut self, fetched: Fetched<Option<Product>>) {
        self.state.has_more = false;
        match fetched {
            Fetched::Data(Some(product)) => {
                self.state.single_barcode_result = Some(product);
                self.state.not_found = false;
                self.state.last_error = None;
            }
            Fetched::Data(None) => {
                self.state.single_barcode_result = None;
                self.state.not_found = true;
                self.state.last_error = None;
            }
            Fetched::Failed(reason) => {
                self.state.single_barcode_result = None;
                self.state.not_found = false;
                self.state.last_error = Some(reason);
            }
        }
    }

    fn publish(&self) {
        let view = CatalogView {
            intent: self.intent.clone(),
            sort_order: self.sort_order,
            page: self.page,
            results: self.state.clone(),
            categories: self.categories.clone(),
            can_load_more: self.can_load_more(),
        };
        self.view_tx.send_replace(Arc::new(view));
    }
}
