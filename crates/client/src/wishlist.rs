use std::sync::Arc;

use chrono::Utc;

use bazaar_core::ProductId;
use bazaar_infra::WishlistStore;
use bazaar_shopping::{WishlistEntry, WishlistItem};

use crate::error::ClientResult;
use crate::session::Principal;

/// Shopper's saved products.
pub struct WishlistSession {
    store: Arc<dyn WishlistStore>,
    principal: Principal,
    entries: Vec<WishlistEntry>,
}

impl WishlistSession {
    pub fn open(store: Arc<dyn WishlistStore>, principal: Principal) -> ClientResult<Self> {
        principal.require_shopper()?;
        Ok(Self {
            store,
            principal,
            entries: Vec::new(),
        })
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    pub fn is_wishlisted(&self, product_id: ProductId) -> bool {
        self.entries.iter().any(|e| e.item.product_id == product_id)
    }

    /// Reload entries. A failed load shows an empty wishlist.
    pub async fn refresh(&mut self) {
        self.entries = match self.store.list_wishlist(self.principal.user_id).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(user_id = %self.principal.user_id, error = %err, "wishlist failed to load");
                Vec::new()
            }
        };
    }

    /// Save a product. Saving it again returns the existing row.
    pub async fn add(&mut self, product_id: ProductId) -> ClientResult<WishlistItem> {
        let user_id = self.principal.user_id;
        if let Some(existing) = self.store.find_wishlist_item(user_id, product_id).await? {
            return Ok(existing);
        }
        let item = self
            .store
            .insert_wishlist_item(WishlistItem::new(user_id, product_id, Utc::now()))
            .await?;
        self.refresh().await;
        Ok(item)
    }

    pub async fn remove(&mut self, product_id: ProductId) -> ClientResult<()> {
        self.store
            .delete_wishlist_item(self.principal.user_id, product_id)
            .await?;
        self.refresh().await;
        Ok(())
    }

    /// Flip the heart icon. Returns whether the product is now wishlisted.
    pub async fn toggle(&mut self, product_id: ProductId) -> ClientResult<bool> {
        if self.is_wishlisted(product_id) {
            self.remove(product_id).await?;
            Ok(false)
        } else {
            self.add(product_id).await?;
            Ok(true)
        }
    }
}

impl core::fmt::Debug for WishlistSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WishlistSession")
            .field("principal", &self.principal)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
