//! Account route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::db::OrderRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Order, OrderItem};
use crate::state::AppState;

/// An order together with its line items, for the history page.
pub struct OrderView {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/orders.html")]
pub struct OrdersTemplate {
    pub current_user: Option<CurrentUser>,
    pub orders: Vec<OrderView>,
}

/// Display the caller's order history, newest first.
#[instrument(skip(state, user))]
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let repo = OrderRepository::new(state.pool());

    let mut orders = Vec::new();
    for order in repo.list_for_user(user.id).await? {
        let items = repo.list_items(order.id).await?;
        orders.push(OrderView { order, items });
    }

    Ok(OrdersTemplate {
        current_user: Some(user),
        orders,
    })
}
