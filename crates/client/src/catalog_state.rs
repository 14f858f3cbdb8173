//! Paginated, filterable product listing state.
//!
//! [`CatalogStateManager`] is the single writer of [`CatalogState`]: every
//! mutation goes through `set_filter` or `load_page`, and readers get cloned
//! snapshots. The state lives as long as the browsing view; nothing here is
//! persisted.
//!
//! Overlapping `load_page` calls are not deduplicated or cancelled. Whichever
//! response resolves last overwrites the listing, even if it was issued first.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use bazaar_catalog::{CatalogFilter, ListQuery, Product};
use bazaar_infra::{CatalogGateway, GatewayError};

/// Listing state for the active filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogState {
    /// Accumulated products in server order; duplicates across pages are kept.
    pub items: Vec<Product>,
    /// Highest page successfully loaded for the active filter.
    pub page: u32,
    pub has_more: bool,
    pub filter: CatalogFilter,
    /// Filter `items` was loaded for; `None` until the first successful load.
    pub last_loaded_filter: Option<CatalogFilter>,
    /// A page-1 fetch is in flight.
    pub loading: bool,
    /// A page > 1 fetch is in flight.
    pub loading_more: bool,
    /// Message of the last failed fetch; empty when the last attempt succeeded
    /// or is still running.
    pub error: String,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            has_more: true,
            filter: CatalogFilter::All,
            last_loaded_filter: None,
            loading: false,
            loading_more: false,
            error: String::new(),
        }
    }
}

impl CatalogState {
    /// True when `items` were loaded for `filter` and can be shown without a
    /// fresh page-1 fetch.
    pub fn has_cached_data_for(&self, filter: &CatalogFilter) -> bool {
        !self.items.is_empty() && self.last_loaded_filter.as_ref() == Some(filter)
    }
}

/// Owner of the listing state and its fetch/append policy.
pub struct CatalogStateManager {
    gateway: Arc<dyn CatalogGateway>,
    state: Mutex<CatalogState>,
}

impl CatalogStateManager {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            gateway,
            state: Mutex::new(CatalogState::default()),
        }
    }

    // No write spans an await, so a poisoned guard still holds whole updates.
    fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Immutable copy of the current state.
    pub fn snapshot(&self) -> CatalogState {
        self.state().clone()
    }

    pub fn filter(&self) -> CatalogFilter {
        self.state().filter.clone()
    }

    pub fn page(&self) -> u32 {
        self.state().page
    }

    pub fn has_more(&self) -> bool {
        self.state().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.state().loading_more
    }

    pub fn error(&self) -> String {
        self.state().error.clone()
    }

    pub fn item_count(&self) -> usize {
        self.state().items.len()
    }

    /// Switch the active filter and rewind to page 1.
    ///
    /// Does not fetch. The caller notices the change and issues
    /// `load_page(1, false)`.
    pub fn set_filter(&self, filter: CatalogFilter) {
        let mut state = self.state();
        tracing::debug!(from = %state.filter, to = %filter, "catalog filter set");
        state.filter = filter;
        state.page = 1;
    }

    pub fn has_cached_data_for_filter(&self, filter: &CatalogFilter) -> bool {
        self.state().has_cached_data_for(filter)
    }

    /// Fetch `page` for the active filter.
    ///
    /// With `append` the results extend `items`; otherwise they replace it. On
    /// failure only the loading flags and `error` change; `items`, `page` and
    /// `has_more` keep their previous values. Returns the number of products
    /// received, or the error that was recorded.
    pub async fn load_page(&self, page: u32, append: bool) -> Result<usize, GatewayError> {
        let filter = {
            let mut state = self.state();
            state.loading = page == 1;
            state.loading_more = page > 1;
            state.error.clear();
            state.filter.clone()
        };

        let query = ListQuery::for_filter(&filter, page);
        tracing::debug!(%filter, page, append, "loading catalog page");

        match self.gateway.list_products(&query).await {
            Ok(result) => {
                let returned = result.items.len();
                let mut state = self.state();
                if append {
                    state.items.extend(result.items);
                } else {
                    state.items = result.items;
                }
                state.page = page;
                state.has_more = result.has_more;
                state.last_loaded_filter = Some(filter);
                state.loading = false;
                state.loading_more = false;
                tracing::debug!(
                    page,
                    returned,
                    total = state.items.len(),
                    has_more = state.has_more,
                    "catalog page loaded"
                );
                Ok(returned)
            }
            Err(err) => {
                tracing::warn!(%filter, page, error = %err, "catalog page failed to load");
                let mut state = self.state();
                state.loading = false;
                state.loading_more = false;
                state.error = err.to_string();
                Err(err)
            }
        }
    }
}

impl core::fmt::Debug for CatalogStateManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogStateManager")
            .field("state", &*self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::collections::VecDeque;

    use async_trait::async_trait;
    use bazaar_catalog::{Price, ProductPage};
    use bazaar_core::{ProductId, UserId};
    use bazaar_infra::GatewayResult;
    use chrono::Utc;
    use proptest::prelude::*;
    use tokio::sync::oneshot;

    pub(crate) fn product(name: &str) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::new(),
            brand_id: UserId::new(),
            name: name.to_string(),
            description: "Desc".to_string(),
            price: Price::from_cents(1_000),
            category: None,
            image_url: "https://cdn.example/p.png".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn products(prefix: &str, n: usize) -> Vec<Product> {
        (0..n).map(|i| product(&format!("{prefix}-{i}"))).collect()
    }

    pub(crate) fn page_of(items: Vec<Product>, has_more: bool) -> GatewayResult<ProductPage> {
        Ok(ProductPage { items, has_more })
    }

    /// Replays queued responses in order and records every query.
    #[derive(Default)]
    pub(crate) struct ScriptedGateway {
        responses: Mutex<VecDeque<GatewayResult<ProductPage>>>,
        pub(crate) queries: Mutex<Vec<ListQuery>>,
    }

    impl ScriptedGateway {
        pub(crate) fn with(responses: Vec<GatewayResult<ProductPage>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                queries: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn push(&self, response: GatewayResult<ProductPage>) {
            self.responses.lock().unwrap().push_back(response);
        }

        pub(crate) fn calls(&self) -> usize {
            self.queries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CatalogGateway for ScriptedGateway {
        async fn list_products(&self, query: &ListQuery) -> GatewayResult<ProductPage> {
            self.queries.lock().unwrap().push(query.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::network("no scripted response")))
        }

        async fn fetch_product(&self, _id: ProductId) -> GatewayResult<Option<Product>> {
            Ok(None)
        }
    }

    /// Each call waits for the response sent on its own channel.
    struct GatedGateway {
        gates: Mutex<VecDeque<oneshot::Receiver<GatewayResult<ProductPage>>>>,
    }

    #[async_trait]
    impl CatalogGateway for GatedGateway {
        async fn list_products(&self, _query: &ListQuery) -> GatewayResult<ProductPage> {
            let gate = self.gates.lock().unwrap().pop_front();
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(GatewayError::network("gate dropped"))),
                None => Err(GatewayError::network("no gate")),
            }
        }

        async fn fetch_product(&self, _id: ProductId) -> GatewayResult<Option<Product>> {
            Ok(None)
        }
    }

    #[test]
    fn starts_with_empty_defaults() {
        let manager = CatalogStateManager::new(ScriptedGateway::with(vec![]));
        let state = manager.snapshot();
        assert!(state.items.is_empty());
        assert_eq!(state.page, 1);
        assert!(state.has_more);
        assert_eq!(state.filter, CatalogFilter::All);
        assert_eq!(state.last_loaded_filter, None);
        assert!(!state.loading && !state.loading_more);
        assert!(state.error.is_empty());
    }

    #[tokio::test]
    async fn all_then_load_more_accumulates_seventeen_items() {
        let gateway = ScriptedGateway::with(vec![
            page_of(products("a", 12), true),
            page_of(products("b", 5), false),
        ]);
        let manager = CatalogStateManager::new(gateway.clone());

        assert_eq!(manager.load_page(1, false).await.unwrap(), 12);
        assert_eq!(manager.load_page(2, true).await.unwrap(), 5);

        let state = manager.snapshot();
        assert_eq!(state.items.len(), 17);
        assert_eq!(state.page, 2);
        assert!(!state.has_more);

        let queries = gateway.queries.lock().unwrap();
        assert_eq!(queries[0].category, None);
        assert_eq!(queries[1].page, 2);
    }

    #[tokio::test]
    async fn failed_filter_switch_keeps_previous_listing() {
        let gateway = ScriptedGateway::with(vec![
            page_of(products("all", 12), true),
            Err(GatewayError::network("network error")),
        ]);
        let manager = CatalogStateManager::new(gateway.clone());
        manager.load_page(1, false).await.unwrap();
        let before = manager.snapshot();

        manager.set_filter(CatalogFilter::category("Apparel"));
        let err = manager.load_page(1, false).await.unwrap_err();

        let after = manager.snapshot();
        assert_eq!(err.to_string(), "network error");
        assert_eq!(after.error, "network error");
        assert_eq!(after.items, before.items);
        assert_eq!(after.page, before.page);
        assert_eq!(after.has_more, before.has_more);
        assert!(!after.loading && !after.loading_more);
        assert_eq!(
            gateway.queries.lock().unwrap()[1].category.as_deref(),
            Some("Apparel")
        );
    }

    #[tokio::test]
    async fn failed_load_more_clears_only_its_flag() {
        let gateway = ScriptedGateway::with(vec![
            page_of(products("a", 12), true),
            Err(GatewayError::network("timeout")),
        ]);
        let manager = CatalogStateManager::new(gateway);
        manager.load_page(1, false).await.unwrap();

        assert!(manager.load_page(2, true).await.is_err());
        let state = manager.snapshot();
        assert_eq!(state.items.len(), 12);
        assert_eq!(state.page, 1);
        assert!(state.has_more);
        assert!(!state.loading_more);
    }

    #[tokio::test]
    async fn first_page_replaces_items() {
        let gateway = ScriptedGateway::with(vec![
            page_of(products("a", 12), true),
            page_of(products("b", 12), true),
            page_of(products("c", 3), false),
        ]);
        let manager = CatalogStateManager::new(gateway);
        manager.load_page(1, false).await.unwrap();
        manager.load_page(2, true).await.unwrap();

        manager.load_page(1, false).await.unwrap();
        let state = manager.snapshot();
        assert_eq!(state.items.len(), 3);
        assert!(state.items.iter().all(|p| p.name.starts_with("c-")));
        assert_eq!(state.page, 1);
    }

    #[tokio::test]
    async fn duplicates_across_pages_are_kept() {
        let repeated = product("same");
        let gateway = ScriptedGateway::with(vec![
            page_of(vec![repeated.clone()], true),
            page_of(vec![repeated.clone()], false),
        ]);
        let manager = CatalogStateManager::new(gateway);
        manager.load_page(1, false).await.unwrap();
        manager.load_page(2, true).await.unwrap();
        assert_eq!(manager.item_count(), 2);
    }

    #[tokio::test]
    async fn error_is_cleared_when_next_fetch_starts() {
        let gateway = ScriptedGateway::with(vec![Err(GatewayError::network("down"))]);
        let manager = CatalogStateManager::new(gateway.clone());
        let _ = manager.load_page(1, false).await;
        assert_eq!(manager.error(), "down");

        gateway.push(page_of(products("a", 1), false));
        manager.load_page(1, false).await.unwrap();
        assert!(manager.error().is_empty());
    }

    #[tokio::test]
    async fn cache_predicate_tracks_last_loaded_filter() {
        let gateway = ScriptedGateway::with(vec![page_of(products("a", 2), false)]);
        let manager = CatalogStateManager::new(gateway);
        assert!(!manager.has_cached_data_for_filter(&CatalogFilter::All));

        manager.load_page(1, false).await.unwrap();
        assert!(manager.has_cached_data_for_filter(&CatalogFilter::All));

        manager.set_filter(CatalogFilter::category("Bags"));
        assert_eq!(manager.page(), 1);
        assert!(!manager.has_cached_data_for_filter(&CatalogFilter::category("Bags")));
        assert!(manager.has_cached_data_for_filter(&CatalogFilter::All));
    }

    #[tokio::test]
    async fn set_filter_after_paging_rewinds_to_first_page() {
        let gateway = ScriptedGateway::with(vec![
            page_of(products("a", 12), true),
            page_of(products("b", 12), true),
            page_of(products("bags", 2), false),
        ]);
        let manager = CatalogStateManager::new(gateway.clone());
        manager.load_page(1, false).await.unwrap();
        manager.load_page(2, true).await.unwrap();
        assert_eq!(manager.page(), 2);

        manager.set_filter(CatalogFilter::category("Bags"));
        assert_eq!(manager.page(), 1);
        assert_eq!(manager.item_count(), 24);

        manager.load_page(manager.page(), false).await.unwrap();
        let queries = gateway.queries.lock().unwrap();
        assert_eq!(queries[2].page, 1);
        assert_eq!(queries[2].category.as_deref(), Some("Bags"));
    }

    #[tokio::test]
    async fn empty_result_is_not_a_cache_hit() {
        let gateway = ScriptedGateway::with(vec![page_of(Vec::new(), false)]);
        let manager = CatalogStateManager::new(gateway);
        manager.load_page(1, false).await.unwrap();
        assert!(!manager.has_cached_data_for_filter(&CatalogFilter::All));
    }

    #[tokio::test]
    async fn loading_flags_follow_page_number_while_in_flight() {
        let (tx1, rx1) = oneshot::channel();
        let (tx2, rx2) = oneshot::channel();
        let manager = CatalogStateManager::new(Arc::new(GatedGateway {
            gates: Mutex::new(VecDeque::from([rx1, rx2])),
        }));

        let observe = async {
            tokio::task::yield_now().await;
            let during_first = (manager.is_loading(), manager.is_loading_more());
            tx1.send(page_of(products("a", 12), true)).unwrap();
            during_first
        };
        let (loaded, during_first) = tokio::join!(manager.load_page(1, false), observe);
        loaded.unwrap();
        assert_eq!(during_first, (true, false));

        let observe = async {
            tokio::task::yield_now().await;
            let during_second = (manager.is_loading(), manager.is_loading_more());
            tx2.send(page_of(products("b", 1), false)).unwrap();
            during_second
        };
        let (loaded, during_second) = tokio::join!(manager.load_page(2, true), observe);
        loaded.unwrap();
        assert_eq!(during_second, (false, true));
        assert!(!manager.is_loading() && !manager.is_loading_more());
    }

    #[tokio::test]
    async fn last_resolved_response_wins() {
        let (tx_first, rx_first) = oneshot::channel();
        let (tx_second, rx_second) = oneshot::channel();
        let manager = CatalogStateManager::new(Arc::new(GatedGateway {
            gates: Mutex::new(VecDeque::from([rx_first, rx_second])),
        }));

        let first_issued = products("first", 2);
        let second_issued = products("second", 3);
        let expected = first_issued.clone();

        let resolve_out_of_order = async {
            tx_second.send(page_of(second_issued, false)).unwrap();
            while manager.item_count() != 3 {
                tokio::task::yield_now().await;
            }
            tx_first.send(page_of(first_issued, true)).unwrap();
        };

        let (a, b, ()) = tokio::join!(
            manager.load_page(1, false),
            manager.load_page(1, false),
            resolve_out_of_order
        );
        a.unwrap();
        b.unwrap();

        let state = manager.snapshot();
        assert_eq!(state.items, expected);
        assert!(state.has_more);
    }

    proptest! {
        #[test]
        fn append_adds_exactly_the_returned_items(first in 0usize..30, second in 0usize..30) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let gateway = ScriptedGateway::with(vec![
                    page_of(products("a", first), true),
                    page_of(products("b", second), false),
                ]);
                let manager = CatalogStateManager::new(gateway);
                manager.load_page(1, false).await.unwrap();
                let prior = manager.item_count();
                manager.load_page(2, true).await.unwrap();
                assert_eq!(manager.item_count(), prior + second);
            });
        }

        #[test]
        fn set_filter_always_rewinds_page(labels in proptest::collection::vec("[A-Z][a-z]{0,8}", 1..8)) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let manager = CatalogStateManager::new(ScriptedGateway::with(vec![
                page_of(products("a", 12), true),
                page_of(products("b", 12), true),
            ]));
            rt.block_on(async {
                manager.load_page(1, false).await.unwrap();
                manager.load_page(2, true).await.unwrap();
            });
            prop_assert_eq!(manager.page(), 2);

            for label in labels {
                let filter = CatalogFilter::category(label);
                manager.set_filter(filter.clone());
                prop_assert_eq!(manager.page(), 1);
                prop_assert_eq!(
                    manager.has_cached_data_for_filter(&filter),
                    filter == CatalogFilter::All
                );
                prop_assert!(manager.has_cached_data_for_filter(&CatalogFilter::All));
            }
        }
    }
}
