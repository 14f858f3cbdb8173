//! Browse flow end to end against the in-memory backend.

use std::sync::Arc;

use chrono::{Duration, Utc};

use bazaar_catalog::{CatalogFilter, Price, Product};
use bazaar_client::{
    BrowseCoordinator, BrowsePhase, CartSession, CatalogStateManager, InMemorySessionStorage,
    Principal, ScrollMemory, Viewport, VirtualViewport, place_order,
};
use bazaar_core::{ProductId, UserId};
use bazaar_infra::InMemoryMarketplace;
use bazaar_shopping::PaymentMethod;

fn backend_with(apparel: usize, bags: usize) -> Arc<InMemoryMarketplace> {
    let backend = Arc::new(InMemoryMarketplace::new());
    let brand = UserId::new();
    let start = Utc::now() - Duration::hours(1);
    let categories = std::iter::repeat_n("Apparel", apparel).chain(std::iter::repeat_n("Bags", bags));
    for (i, category) in categories.enumerate() {
        let created = start + Duration::seconds(i as i64);
        backend.seed_product(Product {
            id: ProductId::new(),
            brand_id: brand,
            name: format!("{category} {i}"),
            description: "Desc".to_string(),
            price: Price::from_cents(1_000),
            category: Some(category.to_string()),
            image_url: format!("https://cdn.example/{i}.jpg"),
            created_at: created,
            updated_at: created,
        });
    }
    backend
}

struct Harness {
    backend: Arc<InMemoryMarketplace>,
    catalog: Arc<CatalogStateManager>,
    scroll: Arc<ScrollMemory>,
    viewport: Arc<VirtualViewport>,
}

impl Harness {
    fn new(backend: Arc<InMemoryMarketplace>) -> Self {
        let viewport = Arc::new(VirtualViewport::new());
        Self {
            catalog: Arc::new(CatalogStateManager::new(backend.clone())),
            scroll: Arc::new(ScrollMemory::new(
                Arc::new(InMemorySessionStorage::new()),
                viewport.clone(),
            )),
            backend,
            viewport,
        }
    }

    fn browse(&self) -> BrowseCoordinator {
        BrowseCoordinator::new(self.catalog.clone(), self.scroll.clone())
    }
}

#[tokio::test]
async fn paginates_newest_first_until_exhausted() {
    let h = Harness::new(backend_with(10, 7));
    let mut browse = h.browse();

    assert_eq!(browse.mount().await, BrowsePhase::Loaded);
    let first = h.catalog.snapshot();
    assert_eq!(first.items.len(), 12);
    assert!(first.has_more);
    assert_eq!(first.items[0].name, "Bags 16");

    assert!(browse.load_more().await);
    let state = h.catalog.snapshot();
    assert_eq!(state.items.len(), 17);
    assert_eq!(state.page, 2);
    assert!(!state.has_more);
    assert_eq!(state.items.last().map(|p| p.name.as_str()), Some("Apparel 0"));

    assert!(!browse.load_more().await);
    assert_eq!(h.backend.list_calls(), 2);
}

#[tokio::test]
async fn navigating_away_and_back_reuses_listing_and_scroll() {
    let h = Harness::new(backend_with(20, 0));
    let mut browse = h.browse();
    browse.mount().await;
    browse.load_more().await;

    h.viewport.scroll_to(1_480);
    browse.unmount();
    h.viewport.scroll_to(0);

    let mut browse = h.browse();
    assert_eq!(browse.mount().await, BrowsePhase::CacheHit);
    assert_eq!(browse.restore_scroll(), Some(1_480));
    assert_eq!(h.viewport.scroll_y(), 1_480.0);
    assert_eq!(h.catalog.item_count(), 20);
    assert_eq!(h.backend.list_calls(), 2);
}

#[tokio::test]
async fn category_switch_and_outage() {
    let h = Harness::new(backend_with(3, 5));
    let mut browse = h.browse();
    browse.mount().await;

    browse.select_filter(CatalogFilter::category("Bags")).await;
    let state = h.catalog.snapshot();
    assert_eq!(state.items.len(), 5);
    assert!(state.items.iter().all(|p| p.category.as_deref() == Some("Bags")));

    h.backend.fail_with("network error");
    let phase = browse.select_filter(CatalogFilter::category("Apparel")).await;
    assert_eq!(phase, BrowsePhase::Error);
    let state = h.catalog.snapshot();
    assert_eq!(state.error, "network error");
    assert_eq!(state.items.len(), 5);
    assert!(!state.loading);

    h.backend.restore();
    assert_eq!(browse.refresh().await, BrowsePhase::Loaded);
    assert_eq!(h.catalog.item_count(), 3);
}

#[tokio::test]
async fn browse_to_checkout() {
    let h = Harness::new(backend_with(2, 1));
    let mut browse = h.browse();
    browse.mount().await;
    let picked = h.catalog.snapshot().items[0].id;

    let mut cart = CartSession::open(h.backend.clone(), Principal::shopper(UserId::new())).unwrap();
    cart.add(picked, 3).await.unwrap();

    let receipt = place_order(&mut cart, PaymentMethod::CashOnDelivery).await.unwrap();
    assert_eq!(receipt.quote.subtotal.cents(), 3_000);
    assert_eq!(receipt.quote.tax.cents(), 300);
    assert_eq!(receipt.quote.total.cents(), 4_300);
    assert!(cart.is_empty());
}
