//! Value object marker: equality by value, never by identity.

/// Marker trait for immutable values compared field by field.
///
/// Catalog filters and prices are value objects: two `CatalogFilter`s naming the
/// same category are the same filter, which is what the listing cache keys on.
///
/// ```ignore
/// let a = CatalogFilter::category("Bags");
/// let b = CatalogFilter::category("Bags");
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
