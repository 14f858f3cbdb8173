use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_catalog::Product;
use bazaar_core::{Entity, ProductId, UserId, WishlistItemId};

/// A `wishlist_items` row. At most one per (user, product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: WishlistItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}

impl WishlistItem {
    pub fn new(user_id: UserId, product_id: ProductId, now: DateTime<Utc>) -> Self {
        Self {
            id: WishlistItemId::new(),
            user_id,
            product_id,
            created_at: now,
        }
    }
}

impl Entity for WishlistItem {
    type Id = WishlistItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Wishlist row joined with its product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    #[serde(flatten)]
    pub item: WishlistItem,
    #[serde(rename = "products")]
    pub product: Product,
}
