use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_catalog::{Price, Product};
use bazaar_core::{CartItemId, DomainError, DomainResult, Entity, ProductId, UserId};

/// Strictly positive line quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn new(value: i64) -> DomainResult<Self> {
        if value <= 0 {
            return Err(DomainError::validation("Quantity must be greater than 0"));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| DomainError::validation("Quantity is too large"))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn saturating_add(self, other: Quantity) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i64 {
    fn from(value: Quantity) -> Self {
        i64::from(value.0)
    }
}

/// A `cart_items` row. One row per (user, product); adding the same product
/// again grows `quantity` instead of inserting a second row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(user_id: UserId, product_id: ProductId, quantity: Quantity, now: DateTime<Utc>) -> Self {
        Self {
            id: CartItemId::new(),
            user_id,
            product_id,
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a repeated add into this row.
    pub fn add(&mut self, quantity: Quantity, now: DateTime<Utc>) {
        self.quantity = self.quantity.saturating_add(quantity);
        self.updated_at = now;
    }

    pub fn set_quantity(&mut self, quantity: Quantity, now: DateTime<Utc>) {
        self.quantity = quantity;
        self.updated_at = now;
    }
}

impl Entity for CartItem {
    type Id = CartItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Cart row joined with its product, as the cart page lists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    #[serde(rename = "products")]
    pub product: Product,
}

impl CartLine {
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.item.quantity.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantity_is_rejected() {
        assert_eq!(
            Quantity::new(0).unwrap_err(),
            DomainError::validation("Quantity must be greater than 0")
        );
        assert!(Quantity::new(-3).is_err());
    }

    #[test]
    fn repeated_add_grows_quantity() {
        let now = Utc::now();
        let mut item = CartItem::new(UserId::new(), ProductId::new(), Quantity::ONE, now);
        item.add(Quantity::new(2).unwrap(), now);
        assert_eq!(item.quantity.get(), 3);
    }

    #[test]
    fn set_quantity_replaces_value() {
        let now = Utc::now();
        let mut item = CartItem::new(UserId::new(), ProductId::new(), Quantity::new(4).unwrap(), now);
        item.set_quantity(Quantity::ONE, now);
        assert_eq!(item.quantity, Quantity::ONE);
    }
}
