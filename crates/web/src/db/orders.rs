//! Order repository.
//!
//! Order placement is transactional: the order row, its line items, the
//! payment record, and the cart clear all commit together or not at all.

use sqlx::PgPool;

use craftloom_core::{CartTotals, OrderId, OrderStatus, PaymentMethod, PaymentStatus, UserId};

use super::RepositoryError;
use crate::models::{CartItem, Order, OrderItem, PaymentTransaction, ShippingAddress};

const ORDER_COLUMNS: &str = "id, user_id, subtotal, shipping, tax, total, status, \
     ship_to_name, ship_to_address, ship_to_city, ship_to_postal_code, created_at";

const ORDER_ITEM_COLUMNS: &str =
    "id, order_id, kind, item_id, title, unit_price, quantity, line_total";

/// The outcome of a payment attempt, as recorded with the order.
#[derive(Debug)]
pub struct PaymentRecord<'a> {
    pub transaction_ref: &'a str,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order from the user's cart lines in a single transaction.
    ///
    /// Inserts the order, copies each cart line into an order item,
    /// records the payment attempt, and (for accepted payments) empties
    /// the cart. If any step fails the whole transaction rolls back and
    /// the cart is untouched. Declined charges are recorded as `Failed`
    /// orders with `clear_cart = false` so the shopper can retry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn place_order(
        &self,
        user_id: UserId,
        lines: &[CartItem],
        totals: &CartTotals,
        status: OrderStatus,
        ship_to: &ShippingAddress,
        payment: &PaymentRecord<'_>,
        clear_cart: bool,
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query_scalar::<_, OrderId>(
            "INSERT INTO orders
                 (user_id, subtotal, shipping, tax, total, status,
                  ship_to_name, ship_to_address, ship_to_city, ship_to_postal_code)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING id",
        )
        .bind(user_id)
        .bind(totals.subtotal)
        .bind(totals.shipping)
        .bind(totals.tax)
        .bind(totals.total)
        .bind(status)
        .bind(&ship_to.full_name)
        .bind(&ship_to.address_line)
        .bind(&ship_to.city)
        .bind(&ship_to.postal_code)
        .fetch_one(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                "INSERT INTO order_items
                     (order_id, kind, item_id, title, unit_price, quantity, line_total)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(order_id)
            .bind(line.kind)
            .bind(line.item_id)
            .bind(&line.title)
            .bind(line.unit_price)
            .bind(line.quantity)
            .bind(line.line_total())
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "INSERT INTO payment_transactions (order_id, transaction_ref, amount, method, status)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(order_id)
        .bind(payment.transaction_ref)
        .bind(totals.total)
        .bind(payment.method)
        .bind(payment.status)
        .execute(&mut *tx)
        .await?;

        if clear_cart {
            sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(order_id)
    }

    /// Get one of the user's orders by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        id: OrderId,
        user_id: UserId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS}
             FROM orders
             WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS}
             FROM orders
             WHERE user_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List the line items of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ORDER_ITEM_COLUMNS}
             FROM order_items
             WHERE order_id = $1
             ORDER BY id"
        ))
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get the recorded payment for an order, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_payment(
        &self,
        order_id: OrderId,
    ) -> Result<Option<PaymentTransaction>, RepositoryError> {
        let row = sqlx::query_as::<_, PaymentTransaction>(
            "SELECT id, order_id, transaction_ref, amount, method, status, created_at
             FROM payment_transactions
             WHERE order_id = $1
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(order_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }
}
