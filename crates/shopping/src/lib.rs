//! Shopper-side domain: cart, wishlist, ratings, profiles and the simulated
//! checkout.
//!
//! Pure rules over backend rows; the client crate drives them through the
//! gateway.

pub mod cart;
pub mod checkout;
pub mod profile;
pub mod rating;
pub mod wishlist;

pub use cart::{CartItem, CartLine, Quantity};
pub use checkout::{CheckoutQuote, OrderConfirmation, PaymentMethod};
pub use profile::{Profile, Role};
pub use rating::{Rating, RatingStats, RatingWithAuthor, Stars};
pub use wishlist::{WishlistEntry, WishlistItem};
