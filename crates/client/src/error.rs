use thiserror::Error;

use bazaar_core::DomainError;
use bazaar_infra::GatewayError;

pub type ClientResult<T> = Result<T, ClientError>;

/// Failure of a client-side session operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Cart, wishlist and rating actions need a signed-in shopper account.
    #[error("this action requires a shopper account")]
    NotShopper,

    /// Product management needs a brand account.
    #[error("this action requires a brand account")]
    NotBrand,

    /// The product belongs to another brand.
    #[error("product belongs to another brand")]
    NotOwner,

    #[error("cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
