//! Shopper's cart as the cart page and header badge see it.

use std::sync::Arc;

use chrono::Utc;

use bazaar_core::{CartItemId, ProductId};
use bazaar_infra::CartStore;
use bazaar_shopping::{CartItem, CartLine, CheckoutQuote, Quantity};

use crate::error::{ClientError, ClientResult};
use crate::session::Principal;

/// Cart lines for one signed-in shopper, reloaded after every mutation.
pub struct CartSession {
    store: Arc<dyn CartStore>,
    principal: Principal,
    lines: Vec<CartLine>,
    loading: bool,
}

impl CartSession {
    /// Fails with [`ClientError::NotShopper`] for brand accounts.
    pub fn open(store: Arc<dyn CartStore>, principal: Principal) -> ClientResult<Self> {
        principal.require_shopper()?;
        Ok(Self {
            store,
            principal,
            lines: Vec::new(),
            loading: false,
        })
    }

    pub fn principal(&self) -> Principal {
        self.principal
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn quote(&self) -> CheckoutQuote {
        CheckoutQuote::for_lines(&self.lines)
    }

    /// Reload lines from the backend. A failed load shows an empty cart.
    pub async fn refresh(&mut self) {
        self.loading = true;
        self.lines = match self.store.list_cart(self.principal.user_id).await {
            Ok(lines) => lines,
            Err(err) => {
                tracing::warn!(user_id = %self.principal.user_id, error = %err, "cart failed to load");
                Vec::new()
            }
        };
        self.loading = false;
    }

    /// Add `quantity` of a product; a product already in the cart has its
    /// quantity increased instead of getting a second line.
    pub async fn add(&mut self, product_id: ProductId, quantity: i64) -> ClientResult<CartItem> {
        let quantity = Quantity::new(quantity)?;
        let user_id = self.principal.user_id;

        let item = match self.store.find_cart_item(user_id, product_id).await? {
            Some(mut existing) => {
                existing.add(quantity, Utc::now());
                self.store
                    .update_cart_quantity(existing.id, existing.quantity)
                    .await?
            }
            None => {
                let item = CartItem::new(user_id, product_id, quantity, Utc::now());
                self.store.insert_cart_item(item).await?
            }
        };
        tracing::info!(%product_id, quantity = item.quantity.get(), "added to cart");

        self.refresh().await;
        Ok(item)
    }

    pub async fn update_quantity(&mut self, id: CartItemId, quantity: i64) -> ClientResult<CartItem> {
        let quantity = Quantity::new(quantity)?;
        let item = self.store.update_cart_quantity(id, quantity).await?;
        self.refresh().await;
        Ok(item)
    }

    pub async fn remove(&mut self, id: CartItemId) -> ClientResult<()> {
        self.store.delete_cart_item(id).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn clear(&mut self) -> ClientResult<()> {
        self.store.clear_cart(self.principal.user_id).await?;
        self.lines.clear();
        Ok(())
    }

    /// Lines as last loaded; an error if the cart holds nothing.
    pub(crate) fn require_lines(&self) -> ClientResult<&[CartLine]> {
        if self.lines.is_empty() {
            return Err(ClientError::EmptyCart);
        }
        Ok(&self.lines)
    }
}

impl core::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartSession")
            .field("principal", &self.principal)
            .field("lines", &self.lines.len())
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}
