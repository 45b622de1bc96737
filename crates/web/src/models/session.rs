//! Session-related types.
//!
//! Types stored in the session for authentication and checkout state.

use serde::{Deserialize, Serialize};

use craftloom_core::{UserId, Username};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's username.
    pub username: Username,
}

/// Shipping address captured during checkout, held in the session until the
/// order is placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub address_line: String,
    pub city: String,
    pub postal_code: String,
}

/// Session keys.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the checkout wizard step string.
    pub const CHECKOUT_STEP: &str = "checkout_step";

    /// Key for the shipping address entered during checkout.
    pub const SHIPPING_ADDRESS: &str = "shipping_address";

    /// Key for the ID of the most recently placed order.
    pub const LAST_ORDER_ID: &str = "last_order_id";
}
