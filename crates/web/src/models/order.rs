//! Order, order item, and payment transaction models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use craftloom_core::{
    ItemKind, OrderId, OrderItemId, OrderStatus, PaymentId, PaymentMethod, PaymentStatus, UserId,
};

/// A placed order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub ship_to_name: String,
    pub ship_to_address: String,
    pub ship_to_city: String,
    pub ship_to_postal_code: String,
    pub created_at: DateTime<Utc>,
}

/// One line of an order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub kind: ItemKind,
    /// ID of the artwork or material this line refers to.
    pub item_id: i32,
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

/// A recorded payment attempt for an order.
///
/// Transaction references are generated locally by the simulated gateway;
/// there is no external reconciliation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentTransaction {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub transaction_ref: String,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}
