//! Simulated order placement. Nothing is charged.

use chrono::Utc;
use uuid::Uuid;

use bazaar_shopping::{CheckoutQuote, OrderConfirmation, PaymentMethod};

use crate::cart::CartSession;
use crate::error::ClientResult;

/// Price the cart, empty it and hand back a receipt.
pub async fn place_order(
    cart: &mut CartSession,
    payment_method: PaymentMethod,
) -> ClientResult<OrderConfirmation> {
    let lines = cart.require_lines()?;
    let quote = CheckoutQuote::for_lines(lines);
    let line_count = lines.len();

    cart.clear().await?;

    let confirmation = OrderConfirmation {
        reference: Uuid::now_v7(),
        quote,
        payment_method,
        line_count,
        placed_at: Utc::now(),
    };
    tracing::info!(
        reference = %confirmation.reference,
        total = %confirmation.quote.total,
        ?payment_method,
        "order placed"
    );
    Ok(confirmation)
}
