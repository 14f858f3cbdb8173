//! Catalog domain module.
//!
//! Product rows as the hosted backend returns them, the listing filter and
//! pagination rules, and the validation brands go through before a product is
//! written. Deterministic logic only (no IO, no HTTP, no storage).

pub mod filter;
pub mod image;
pub mod listing;
pub mod price;
pub mod product;

pub use filter::{CATEGORIES, CatalogFilter};
pub use image::{ImageUpload, MAX_IMAGE_BYTES};
pub use listing::{ListQuery, PAGE_SIZE, ProductPage};
pub use price::Price;
pub use product::{Product, ProductDraft, ProductPatch};
