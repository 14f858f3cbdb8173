//! Entity trait: rows that keep their identity while their fields change.

/// Anything the backend stores as an addressable row (products, cart lines,
/// wishlist entries, ratings, profiles).
pub trait Entity {
    /// Strongly-typed row identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the row identifier.
    fn id(&self) -> &Self::Id;
}
