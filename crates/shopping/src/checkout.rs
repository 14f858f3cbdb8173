//! Simulated checkout. Prices a cart; no payment is taken.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_catalog::Price;

use crate::cart::CartLine;

/// Flat shipping charge.
pub const SHIPPING: Price = Price::from_cents(1_000);

/// Tax applied to the subtotal, in percent.
pub const TAX_PERCENT: u64 = 10;

/// Payment option picked on the checkout page. Label only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    CashOnDelivery,
}

/// Price breakdown shown before an order is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutQuote {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl CheckoutQuote {
    pub fn for_lines(lines: &[CartLine]) -> Self {
        let subtotal: Price = lines.iter().map(CartLine::line_total).sum();
        let tax = subtotal.percent(TAX_PERCENT);
        Self {
            subtotal,
            shipping: SHIPPING,
            tax,
            total: subtotal.plus(SHIPPING).plus(tax),
        }
    }
}

/// Receipt for a simulated order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub reference: Uuid,
    pub quote: CheckoutQuote,
    pub payment_method: PaymentMethod,
    pub line_count: usize,
    pub placed_at: DateTime<Utc>,
}
