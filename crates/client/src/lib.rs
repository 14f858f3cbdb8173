//! Marketplace client core.
//!
//! The browsing view's state ([`catalog_state`]), its scroll memory
//! ([`scroll`]) and the flow tying them together ([`browse`]), plus the
//! shopper and brand sessions that sit next to the catalog: cart, wishlist,
//! ratings, profile, brand dashboard and simulated checkout.
//!
//! Everything talks to the backend through the `bazaar-infra` gateway traits,
//! so the same code runs against the hosted backend or the in-memory one.

pub mod account;
pub mod brand;
pub mod browse;
pub mod cart;
pub mod catalog_state;
pub mod checkout;
pub mod config;
pub mod error;
pub mod ratings;
pub mod scroll;
pub mod session;
pub mod wishlist;

pub use account::ProfileClient;
pub use brand::BrandCatalog;
pub use browse::{BrowseCoordinator, BrowsePhase, BrowseView, Visibility};
pub use cart::CartSession;
pub use catalog_state::{CatalogState, CatalogStateManager};
pub use checkout::place_order;
pub use config::{BackendConfig, ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult};
pub use ratings::RatingsClient;
pub use scroll::{
    DEFAULT_SCROLL_KEY, InMemorySessionStorage, ScrollMemory, SessionStorage, StorageError,
    Viewport, VirtualViewport,
};
pub use session::Principal;
pub use wishlist::WishlistSession;
