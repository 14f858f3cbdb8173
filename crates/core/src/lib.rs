//! `bazaar-core`: shared marketplace primitives.
//!
//! Identifiers, the domain error model and the entity/value-object markers used
//! by the catalog, shopping and client crates. No IO lives here.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CartItemId, ProductId, RatingId, UserId, WishlistItemId};
pub use value_object::ValueObject;
