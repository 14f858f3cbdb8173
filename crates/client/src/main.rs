//! `bazaar-browse`: headless walk through the marketplace browsing flow.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};

use bazaar_catalog::{CATEGORIES, CatalogFilter, Price, Product};
use bazaar_client::{
    BrowseCoordinator, CatalogStateManager, ClientConfig, InMemorySessionStorage, ScrollMemory,
    Viewport, VirtualViewport,
};
use bazaar_core::{ProductId, UserId};
use bazaar_infra::{CatalogGateway, InMemoryMarketplace};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bazaar_observability::init();

    let config = ClientConfig::from_env().context("invalid client configuration")?;
    let gateway = catalog_gateway(&config);

    let catalog = Arc::new(CatalogStateManager::new(gateway));
    let viewport = Arc::new(VirtualViewport::new());
    let scroll = Arc::new(ScrollMemory::with_key(
        Arc::new(InMemorySessionStorage::new()),
        viewport.clone(),
        config.scroll_key.clone(),
    ));

    let mut browse = BrowseCoordinator::new(catalog.clone(), scroll.clone());
    let phase = browse.mount().await;
    tracing::info!(?phase, items = catalog.item_count(), "first page");

    if browse.load_more().await {
        tracing::info!(page = catalog.page(), items = catalog.item_count(), "loaded more");
    }

    // Leave and come back: the listing is served from memory and the scroll
    // offset is put back.
    viewport.scroll_to(640);
    browse.unmount();
    let mut browse = BrowseCoordinator::new(catalog.clone(), scroll);
    let phase = browse.mount().await;
    let restored = browse.restore_scroll();
    tracing::info!(?phase, ?restored, "returned to marketplace");

    let phase = browse.select_filter(CatalogFilter::category("Bags")).await;
    tracing::info!(?phase, items = catalog.item_count(), "switched category");

    let view = browse.view();
    let snapshot = serde_json::to_string(&view).context("failed to serialize browse view")?;
    tracing::info!(%snapshot, "final view");

    if !view.state.error.is_empty() {
        anyhow::bail!("catalog failed to load: {}", view.state.error);
    }
    Ok(())
}

fn catalog_gateway(config: &ClientConfig) -> Arc<dyn CatalogGateway> {
    match &config.backend {
        #[cfg(feature = "rest")]
        Some(backend) => {
            tracing::info!(url = %backend.url, "using hosted backend");
            Arc::new(bazaar_infra::RestCatalog::new(
                backend.url.clone(),
                backend.anon_key.clone(),
            ))
        }
        #[cfg(not(feature = "rest"))]
        Some(backend) => {
            tracing::warn!(
                url = %backend.url,
                "built without the `rest` feature; using the in-memory backend"
            );
            Arc::new(demo_backend())
        }
        None => {
            tracing::info!("no backend configured; using the in-memory backend");
            Arc::new(demo_backend())
        }
    }
}

/// A few pages of products spread over the category vocabulary.
fn demo_backend() -> InMemoryMarketplace {
    let backend = InMemoryMarketplace::new();
    let brand = UserId::new();
    let start = Utc::now() - Duration::days(1);
    let categories: Vec<&str> = CATEGORIES.iter().copied().filter(|c| *c != "All").collect();

    for i in 0..30u64 {
        let category = categories[i as usize % categories.len()];
        let created = start + Duration::minutes(i as i64);
        backend.seed_product(Product {
            id: ProductId::new(),
            brand_id: brand,
            name: format!("{category} item {i}"),
            description: format!("Demo {} listing", category.to_lowercase()),
            price: Price::from_cents(1_500 + i * 250),
            category: Some(category.to_string()),
            image_url: format!("https://cdn.example/demo/{i}.jpg"),
            created_at: created,
            updated_at: created,
        });
    }
    backend
}
