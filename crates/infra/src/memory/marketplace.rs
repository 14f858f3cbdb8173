use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use bazaar_catalog::{ListQuery, PAGE_SIZE, Product, ProductPage, ProductPatch};
use bazaar_core::{CartItemId, DomainError, ProductId, RatingId, UserId, WishlistItemId};
use bazaar_shopping::{
    CartItem, CartLine, Profile, Quantity, Rating, RatingWithAuthor, Stars, WishlistEntry,
    WishlistItem,
};

use super::table::InMemoryTable;
use crate::gateway::{
    CartStore, CatalogGateway, GatewayError, GatewayResult, ProductStore, ProfileStore,
    RatingStore, WishlistStore,
};

/// All marketplace tables in one process.
#[derive(Debug, Default)]
pub struct InMemoryMarketplace {
    products: InMemoryTable<ProductId, Product>,
    cart: InMemoryTable<CartItemId, CartItem>,
    wishlist: InMemoryTable<WishlistItemId, WishlistItem>,
    ratings: InMemoryTable<RatingId, Rating>,
    profiles: InMemoryTable<UserId, Profile>,
    outage: RwLock<Option<String>>,
    list_calls: AtomicUsize,
}

impl InMemoryMarketplace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product row as-is (timestamps included).
    pub fn seed_product(&self, product: Product) {
        self.products.upsert(product.id, product);
    }

    pub fn seed_profile(&self, profile: Profile) {
        self.profiles.upsert(profile.id, profile);
    }

    /// Make every call fail with `message` until [`InMemoryMarketplace::restore`].
    pub fn fail_with(&self, message: impl Into<String>) {
        if let Ok(mut outage) = self.outage.write() {
            *outage = Some(message.into());
        }
    }

    pub fn restore(&self) {
        if let Ok(mut outage) = self.outage.write() {
            *outage = None;
        }
    }

    /// How many listing requests have been served (failed ones included).
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    fn check(&self) -> GatewayResult<()> {
        match self.outage.read().ok().and_then(|o| o.clone()) {
            Some(message) => Err(GatewayError::Unavailable(message)),
            None => Ok(()),
        }
    }

    fn newest_products<P>(&self, pred: P) -> Vec<Product>
    where
        P: Fn(&Product) -> bool,
    {
        let mut rows = self.products.filter_newest_first(pred);
        // Stable: equal timestamps keep most-recently-inserted first.
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

#[async_trait]
impl CatalogGateway for InMemoryMarketplace {
    async fn list_products(&self, query: &ListQuery) -> GatewayResult<ProductPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let matching = self.newest_products(|p| query.matches(p));
        let total = matching.len();
        let offset = query.offset();
        let items: Vec<Product> = matching
            .into_iter()
            .skip(offset)
            .take(PAGE_SIZE as usize)
            .collect();

        tracing::debug!(
            page = query.page,
            category = ?query.category,
            returned = items.len(),
            total,
            "served product page"
        );
        Ok(ProductPage::from_counted(items, offset, Some(total)))
    }

    async fn fetch_product(&self, id: ProductId) -> GatewayResult<Option<Product>> {
        self.check()?;
        Ok(self.products.get(&id))
    }
}

#[async_trait]
impl ProductStore for InMemoryMarketplace {
    async fn insert_product(&self, product: Product) -> GatewayResult<Product> {
        self.check()?;
        if self.products.get(&product.id).is_some() {
            return Err(DomainError::conflict("product already exists").into());
        }
        self.products.upsert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: ProductId, patch: ProductPatch) -> GatewayResult<Product> {
        self.check()?;
        let now = Utc::now();
        self.products
            .update(&id, |p| p.apply_patch(patch, now))
            .ok_or_else(|| DomainError::not_found().into())
    }

    async fn delete_product(&self, id: ProductId) -> GatewayResult<()> {
        self.check()?;
        self.products.remove(&id);
        // Cascades, as the foreign keys do remotely.
        self.cart.retain(|c| c.product_id != id);
        self.wishlist.retain(|w| w.product_id != id);
        self.ratings.retain(|r| r.product_id != id);
        Ok(())
    }
}

#[async_trait]
impl CartStore for InMemoryMarketplace {
    async fn list_cart(&self, user_id: UserId) -> GatewayResult<Vec<CartLine>> {
        self.check()?;
        let mut items = self.cart.filter_newest_first(|c| c.user_id == user_id);
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items
            .into_iter()
            .filter_map(|item| {
                let product = self.products.get(&item.product_id)?;
                Some(CartLine { item, product })
            })
            .collect())
    }

    async fn find_cart_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> GatewayResult<Option<CartItem>> {
        self.check()?;
        Ok(self
            .cart
            .find(|c| c.user_id == user_id && c.product_id == product_id))
    }

    async fn insert_cart_item(&self, item: CartItem) -> GatewayResult<CartItem> {
        self.check()?;
        if self.products.get(&item.product_id).is_none() {
            return Err(DomainError::not_found().into());
        }
        let duplicate = self
            .cart
            .find(|c| c.user_id == item.user_id && c.product_id == item.product_id);
        if duplicate.is_some() {
            return Err(DomainError::conflict("product is already in the cart").into());
        }
        self.cart.upsert(item.id, item.clone());
        Ok(item)
    }

    async fn update_cart_quantity(
        &self,
        id: CartItemId,
        quantity: Quantity,
    ) -> GatewayResult<CartItem> {
        self.check()?;
        let now = Utc::now();
        self.cart
            .update(&id, |c| c.set_quantity(quantity, now))
            .ok_or_else(|| DomainError::not_found().into())
    }

    async fn delete_cart_item(&self, id: CartItemId) -> GatewayResult<()> {
        self.check()?;
        self.cart.remove(&id);
        Ok(())
    }

    async fn clear_cart(&self, user_id: UserId) -> GatewayResult<()> {
        self.check()?;
        self.cart.retain(|c| c.user_id != user_id);
        Ok(())
    }

    async fn count_cart_items(&self, user_id: UserId) -> GatewayResult<usize> {
        self.check()?;
        Ok(self.cart.filter_newest_first(|c| c.user_id == user_id).len())
    }
}

#[async_trait]
impl WishlistStore for InMemoryMarketplace {
    async fn list_wishlist(&self, user_id: UserId) -> GatewayResult<Vec<WishlistEntry>> {
        self.check()?;
        let mut items = self.wishlist.filter_newest_first(|w| w.user_id == user_id);
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items
            .into_iter()
            .filter_map(|item| {
                let product = self.products.get(&item.product_id)?;
                Some(WishlistEntry { item, product })
            })
            .collect())
    }

    async fn find_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> GatewayResult<Option<WishlistItem>> {
        self.check()?;
        Ok(self
            .wishlist
            .find(|w| w.user_id == user_id && w.product_id == product_id))
    }

    async fn insert_wishlist_item(&self, item: WishlistItem) -> GatewayResult<WishlistItem> {
        self.check()?;
        if self.products.get(&item.product_id).is_none() {
            return Err(DomainError::not_found().into());
        }
        let duplicate = self
            .wishlist
            .find(|w| w.user_id == item.user_id && w.product_id == item.product_id);
        if duplicate.is_some() {
            return Err(DomainError::conflict("product is already wishlisted").into());
        }
        self.wishlist.upsert(item.id, item.clone());
        Ok(item)
    }

    async fn delete_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> GatewayResult<()> {
        self.check()?;
        self.wishlist
            .retain(|w| !(w.user_id == user_id && w.product_id == product_id));
        Ok(())
    }
}

#[async_trait]
impl RatingStore for InMemoryMarketplace {
    async fn list_ratings(&self, product_id: ProductId) -> GatewayResult<Vec<RatingWithAuthor>> {
        self.check()?;
        let mut ratings = self.ratings.filter_newest_first(|r| r.product_id == product_id);
        ratings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ratings
            .into_iter()
            .map(|rating| {
                let author_name = self
                    .profiles
                    .get(&rating.user_id)
                    .map(|p| p.name)
                    .unwrap_or_default();
                RatingWithAuthor { rating, author_name }
            })
            .collect())
    }

    async fn rating_stars(&self, product_id: ProductId) -> GatewayResult<Vec<Stars>> {
        self.check()?;
        Ok(self
            .ratings
            .filter_newest_first(|r| r.product_id == product_id)
            .into_iter()
            .map(|r| r.rating)
            .collect())
    }

    async fn find_rating(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> GatewayResult<Option<Rating>> {
        self.check()?;
        Ok(self
            .ratings
            .find(|r| r.user_id == user_id && r.product_id == product_id))
    }

    async fn insert_rating(&self, rating: Rating) -> GatewayResult<Rating> {
        self.check()?;
        let duplicate = self
            .ratings
            .find(|r| r.user_id == rating.user_id && r.product_id == rating.product_id);
        if duplicate.is_some() {
            return Err(DomainError::conflict("product already rated by this user").into());
        }
        self.ratings.upsert(rating.id, rating.clone());
        Ok(rating)
    }

    async fn update_rating(&self, rating: Rating) -> GatewayResult<Rating> {
        self.check()?;
        let updated = rating.clone();
        self.ratings
            .update(&rating.id, move |r| *r = updated)
            .ok_or_else(|| DomainError::not_found().into())
    }
}

#[async_trait]
impl ProfileStore for InMemoryMarketplace {
    async fn fetch_profile(&self, user_id: UserId) -> GatewayResult<Option<Profile>> {
        self.check()?;
        Ok(self.profiles.get(&user_id))
    }

    async fn update_profile(&self, profile: Profile) -> GatewayResult<Profile> {
        self.check()?;
        let updated = profile.clone();
        self.profiles
            .update(&profile.id, move |p| *p = updated)
            .ok_or_else(|| DomainError::not_found().into())
    }
}
