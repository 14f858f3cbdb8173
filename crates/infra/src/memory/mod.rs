//! In-process backend.
//!
//! Behaves like the hosted tables closely enough for the client to be driven
//! end to end without a network: newest-first ordering, exact counts for
//! paging, one cart row per (user, product).

pub mod marketplace;
pub mod table;

pub use marketplace::InMemoryMarketplace;
pub use table::InMemoryTable;
