//! Marketplace browsing flow.
//!
//! [`BrowseCoordinator`] turns view signals (mounted, filter clicked, became
//! visible, load-more clicked, unmounted) into catalog fetches and scroll
//! restoration:
//!
//! ```text
//! Uninitialized --mount, no cache--> Fetching --ok--> Loaded
//! Uninitialized --mount, cache hit--> CacheHit --restore scroll--> Loaded
//! Loaded --filter changed--> Fetching (page 1, replace)
//! Loaded --load more, has_more--> Fetching (next page, append)
//! Fetching --failure--> Error
//! ```
//!
//! A filter change is detected by comparing the filter last acted on with the
//! manager's current filter whenever the view reports itself active.

use std::sync::Arc;

use serde::Serialize;

use bazaar_catalog::CatalogFilter;

use crate::catalog_state::{CatalogState, CatalogStateManager};
use crate::scroll::ScrollMemory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowsePhase {
    Uninitialized,
    /// Mounted over listing data already loaded for the active filter; scroll
    /// restoration is pending.
    CacheHit,
    Fetching { append: bool },
    Loaded,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// What the listing view should render right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseView {
    pub phase: BrowsePhase,
    pub state: CatalogState,
    /// Full-page spinner: a page-1 fetch with nothing usable to show.
    pub show_spinner: bool,
    /// Empty-catalog placeholder.
    pub show_empty: bool,
    pub can_load_more: bool,
}

/// Drives one mounted browsing view.
#[derive(Debug)]
pub struct BrowseCoordinator {
    catalog: Arc<CatalogStateManager>,
    scroll: Arc<ScrollMemory>,
    phase: BrowsePhase,
    seen_filter: Option<CatalogFilter>,
}

impl BrowseCoordinator {
    pub fn new(catalog: Arc<CatalogStateManager>, scroll: Arc<ScrollMemory>) -> Self {
        Self {
            catalog,
            scroll,
            phase: BrowsePhase::Uninitialized,
            seen_filter: None,
        }
    }

    pub fn phase(&self) -> BrowsePhase {
        self.phase
    }

    pub fn catalog(&self) -> &CatalogStateManager {
        &self.catalog
    }

    /// The view mounted. Fetches page 1 unless the listing already holds data
    /// for the active filter.
    pub async fn mount(&mut self) -> BrowsePhase {
        let filter = self.catalog.filter();
        self.seen_filter = Some(filter.clone());

        if self.catalog.has_cached_data_for_filter(&filter) {
            tracing::debug!(%filter, "browse mounted over cached listing");
            self.phase = BrowsePhase::CacheHit;
        } else {
            tracing::debug!(%filter, "browse mounted without cache; fetching");
            self.fetch(1, false).await;
        }
        self.phase
    }

    /// Restore the saved scroll offset, if any, and clear it.
    ///
    /// Leaves `CacheHit` for `Loaded` even when nothing was saved. Returns the
    /// offset scrolled to.
    pub fn restore_scroll(&mut self) -> Option<u64> {
        if self.phase == BrowsePhase::CacheHit {
            self.phase = BrowsePhase::Loaded;
        }

        let saved = self.scroll.saved();
        if saved == 0 {
            return None;
        }
        self.scroll.viewport().scroll_to(saved);
        self.scroll.clear();
        tracing::debug!(offset = saved, "scroll position restored");
        Some(saved)
    }

    /// User picked a filter.
    pub async fn select_filter(&mut self, filter: CatalogFilter) -> BrowsePhase {
        self.catalog.set_filter(filter);
        self.activate().await
    }

    /// The view became active. Refetches page 1 if the filter changed since
    /// it was last acted on.
    pub async fn activate(&mut self) -> BrowsePhase {
        let current = self.catalog.filter();
        if self.seen_filter.as_ref() != Some(&current) {
            tracing::info!(filter = %current, "catalog filter changed");
            self.seen_filter = Some(current);
            self.fetch(1, false).await;
        }
        self.phase
    }

    /// Whether a load-more request would be issued.
    pub fn can_load_more(&self) -> bool {
        let state = self.catalog.snapshot();
        matches!(self.phase, BrowsePhase::Loaded | BrowsePhase::Error)
            && state.has_more
            && !state.loading
            && !state.loading_more
            && state.has_cached_data_for(&state.filter)
    }

    /// Append the next page. No-op (returns `false`) when there is nothing
    /// more to load or a fetch is already running.
    pub async fn load_more(&mut self) -> bool {
        if !self.can_load_more() {
            return false;
        }
        let next = self.catalog.page() + 1;
        self.fetch(next, true).await;
        true
    }

    /// Refetch page 1 for the active filter, replacing the listing.
    pub async fn refresh(&mut self) -> BrowsePhase {
        self.seen_filter = Some(self.catalog.filter());
        self.fetch(1, false).await;
        self.phase
    }

    /// Hidden saves the scroll offset. Visible restores it, then refetches
    /// page 1 if the filter was changed elsewhere while hidden.
    pub async fn on_visibility_change(&mut self, visibility: Visibility) -> Option<u64> {
        match visibility {
            Visibility::Hidden => {
                self.scroll.save();
                None
            }
            Visibility::Visible => {
                let restored = self.restore_scroll();
                self.activate().await;
                restored
            }
        }
    }

    /// The view is going away; remember where the shopper was.
    pub fn unmount(self) {
        self.scroll.save();
        tracing::debug!("browse unmounted");
    }

    pub fn view(&self) -> BrowseView {
        let state = self.catalog.snapshot();
        let cached = state.has_cached_data_for(&state.filter);
        let show_spinner = state.loading && !cached;
        let show_empty = !show_spinner && state.items.is_empty();
        BrowseView {
            phase: self.phase,
            show_spinner,
            show_empty,
            can_load_more: self.can_load_more(),
            state,
        }
    }

    async fn fetch(&mut self, page: u32, append: bool) {
        self.phase = BrowsePhase::Fetching { append };
        self.phase = match self.catalog.load_page(page, append).await {
            Ok(_) => BrowsePhase::Loaded,
            Err(_) => BrowsePhase::Error,
        };
    }
}
