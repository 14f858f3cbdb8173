//! Infrastructure layer: the boundary to the hosted marketplace backend.
//!
//! - [`gateway`]: async traits for every table the client reads or writes.
//! - [`memory`]: in-process backend for tests, demos and local development.
//! - `rest` (feature `rest`): PostgREST-style HTTP catalog gateway.

pub mod gateway;
pub mod memory;
#[cfg(feature = "rest")]
pub mod rest;

pub use gateway::{
    CartStore, CatalogGateway, GatewayError, GatewayResult, ProductStore, ProfileStore,
    RatingStore, WishlistStore,
};
pub use memory::{InMemoryMarketplace, InMemoryTable};
#[cfg(feature = "rest")]
pub use rest::RestCatalog;
