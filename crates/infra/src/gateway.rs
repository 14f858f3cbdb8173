//! Backend access traits.
//!
//! Each trait mirrors one table of the hosted backend. Row-level security and
//! authentication are enforced remotely; these traits only move rows.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use bazaar_catalog::{ListQuery, Product, ProductPage, ProductPatch};
use bazaar_core::{CartItemId, DomainError, ProductId, UserId};
use bazaar_shopping::{
    CartItem, CartLine, Profile, Quantity, Rating, RatingWithAuthor, Stars, WishlistEntry,
    WishlistItem,
};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure talking to the backend.
///
/// The `Display` form is what listing views show to the shopper, so transport
/// variants render their message without a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Request never produced a response (DNS, TLS, connection reset, timeout).
    #[error("{0}")]
    Network(String),

    /// Backend answered with a non-success status.
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Response body did not match the expected row shape.
    #[error("failed to decode backend response: {0}")]
    Decode(String),

    /// Backend is switched off (in-memory backend fault injection).
    #[error("{0}")]
    Unavailable(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl GatewayError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}

/// Read side of the product catalog.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// One page of products, newest first, `PAGE_SIZE` rows at most.
    async fn list_products(&self, query: &ListQuery) -> GatewayResult<ProductPage>;

    /// A single product; `Ok(None)` when no such row exists.
    async fn fetch_product(&self, id: ProductId) -> GatewayResult<Option<Product>>;
}

/// Brand-side product writes.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: Product) -> GatewayResult<Product>;
    async fn update_product(&self, id: ProductId, patch: ProductPatch) -> GatewayResult<Product>;
    async fn delete_product(&self, id: ProductId) -> GatewayResult<()>;
}

/// `cart_items` table.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// The user's cart rows joined with their products, newest first.
    async fn list_cart(&self, user_id: UserId) -> GatewayResult<Vec<CartLine>>;
    async fn find_cart_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> GatewayResult<Option<CartItem>>;
    async fn insert_cart_item(&self, item: CartItem) -> GatewayResult<CartItem>;
    async fn update_cart_quantity(
        &self,
        id: CartItemId,
        quantity: Quantity,
    ) -> GatewayResult<CartItem>;
    async fn delete_cart_item(&self, id: CartItemId) -> GatewayResult<()>;
    async fn clear_cart(&self, user_id: UserId) -> GatewayResult<()>;
    /// Number of cart rows (not the sum of quantities).
    async fn count_cart_items(&self, user_id: UserId) -> GatewayResult<usize>;
}

/// `wishlist_items` table.
#[async_trait]
pub trait WishlistStore: Send + Sync {
    async fn list_wishlist(&self, user_id: UserId) -> GatewayResult<Vec<WishlistEntry>>;
    async fn find_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> GatewayResult<Option<WishlistItem>>;
    async fn insert_wishlist_item(&self, item: WishlistItem) -> GatewayResult<WishlistItem>;
    async fn delete_wishlist_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> GatewayResult<()>;
}

/// `product_ratings` table.
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Ratings for a product with reviewer names, newest first.
    async fn list_ratings(&self, product_id: ProductId) -> GatewayResult<Vec<RatingWithAuthor>>;
    async fn rating_stars(&self, product_id: ProductId) -> GatewayResult<Vec<Stars>>;
    async fn find_rating(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> GatewayResult<Option<Rating>>;
    async fn insert_rating(&self, rating: Rating) -> GatewayResult<Rating>;
    async fn update_rating(&self, rating: Rating) -> GatewayResult<Rating>;
}

/// `profiles` table.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_profile(&self, user_id: UserId) -> GatewayResult<Option<Profile>>;
    async fn update_profile(&self, profile: Profile) -> GatewayResult<Profile>;
}

#[async_trait]
impl<G> CatalogGateway for Arc<G>
where
    G: CatalogGateway + ?Sized,
{
    async fn list_products(&self, query: &ListQuery) -> GatewayResult<ProductPage> {
        (**self).list_products(query).await
    }

    async fn fetch_product(&self, id: ProductId) -> GatewayResult<Option<Product>> {
        (**self).fetch_product(id).await
    }
}
