//! Domain models for the marketplace.

pub mod catalog;
pub mod order;
pub mod session;
pub mod user;

pub use catalog::{Artwork, Blog, CartItem, Material, Portfolio, Tutorial};
pub use order::{Order, OrderItem, PaymentTransaction};
pub use session::{CurrentUser, ShippingAddress, session_keys};
pub use user::User;
