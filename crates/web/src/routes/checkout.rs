//! Checkout wizard route handlers.
//!
//! The wizard walks cart → shipping → payment → confirmation. The
//! current step and the shipping address live in the session; the cart
//! lines stay in the database until the order is placed. Entering any
//! step with an empty cart bounces back to the cart page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use craftloom_core::{CartTotals, CheckoutStep, OrderId, OrderStatus, PaymentMethod, PaymentStatus};

use crate::db::orders::{OrderRepository, PaymentRecord};
use crate::db::CartRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{session_keys, CartItem, CurrentUser, Order, ShippingAddress};
use crate::routes::cart::totals_for;
use crate::services::payment::PaymentDetails;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Shipping address form data.
#[derive(Debug, Deserialize)]
pub struct ShippingForm {
    pub full_name: String,
    pub address_line: String,
    pub city: String,
    pub postal_code: String,
}

/// Payment form data.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    /// `card`, `upi`, or `cod`.
    pub method: String,
    pub card_number: Option<String>,
    pub upi_id: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Checkout wizard template; renders whichever step is current.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub current_user: Option<CurrentUser>,
    pub step: CheckoutStep,
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    pub shipping: Option<ShippingAddress>,
    /// Set on the confirmation step.
    pub order: Option<Order>,
    pub error: Option<String>,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the wizard step from the session, defaulting to `Cart`.
async fn current_step(session: &Session) -> CheckoutStep {
    session
        .get::<String>(session_keys::CHECKOUT_STEP)
        .await
        .ok()
        .flatten()
        .map_or(CheckoutStep::Cart, |s| CheckoutStep::parse(&s))
}

/// Store the wizard step in the session.
async fn set_step(session: &Session, step: CheckoutStep) -> Result<()> {
    session
        .insert(session_keys::CHECKOUT_STEP, step.as_str())
        .await?;
    Ok(())
}

async fn stored_shipping(session: &Session) -> Option<ShippingAddress> {
    session
        .get::<ShippingAddress>(session_keys::SHIPPING_ADDRESS)
        .await
        .ok()
        .flatten()
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the current wizard step.
///
/// `Cart` advances straight to the shipping form; the cart itself is
/// reviewed at `/cart`.
#[instrument(skip(state, session, user))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    let step = current_step(&session).await;
    let items = CartRepository::new(state.pool()).list(user.id).await?;

    // Short-circuit: nothing to check out (confirmation shows the placed order)
    if items.is_empty() && step != CheckoutStep::Confirmation {
        return Ok(Redirect::to("/cart").into_response());
    }

    let step = if step == CheckoutStep::Cart {
        CheckoutStep::Shipping
    } else {
        step
    };

    let order = if step == CheckoutStep::Confirmation {
        match session
            .get::<OrderId>(session_keys::LAST_ORDER_ID)
            .await
            .ok()
            .flatten()
        {
            Some(order_id) => {
                OrderRepository::new(state.pool())
                    .get_for_user(order_id, user.id)
                    .await?
            }
            None => None,
        }
    } else {
        None
    };

    let totals = totals_for(&state, &items);
    let shipping = stored_shipping(&session).await;

    Ok(CheckoutTemplate {
        current_user: Some(user),
        step,
        items,
        totals,
        shipping,
        order,
        error: query.error,
    }
    .into_response())
}

/// Validate and store the shipping address, advancing to payment.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn submit_shipping(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ShippingForm>,
) -> Result<Response> {
    let items = CartRepository::new(state.pool()).list(user.id).await?;
    if items.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let address = ShippingAddress {
        full_name: form.full_name.trim().to_string(),
        address_line: form.address_line.trim().to_string(),
        city: form.city.trim().to_string(),
        postal_code: form.postal_code.trim().to_string(),
    };

    if address.full_name.is_empty()
        || address.address_line.is_empty()
        || address.city.is_empty()
        || address.postal_code.is_empty()
    {
        return Ok(Redirect::to("/checkout?error=incomplete_address").into_response());
    }

    session
        .insert(session_keys::SHIPPING_ADDRESS, &address)
        .await?;
    set_step(&session, CheckoutStep::Payment).await?;

    Ok(Redirect::to("/checkout").into_response())
}

/// Charge the cart total and place the order.
///
/// An accepted charge clears the cart and advances to confirmation; a
/// declined one records a failed order, keeps the cart, and stays on
/// the payment step.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn submit_payment(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(form): Form<PaymentForm>,
) -> Result<Response> {
    let items = CartRepository::new(state.pool()).list(user.id).await?;
    if items.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let Some(shipping) = stored_shipping(&session).await else {
        set_step(&session, CheckoutStep::Shipping).await?;
        return Ok(Redirect::to("/checkout?error=missing_address").into_response());
    };

    let details = match PaymentMethod::from_form_value(&form.method) {
        PaymentMethod::Upi => PaymentDetails::Upi {
            upi_id: form.upi_id.as_deref().unwrap_or_default(),
        },
        PaymentMethod::Cod => PaymentDetails::Cod,
        PaymentMethod::Card => PaymentDetails::Card {
            number: form.card_number.as_deref().unwrap_or_default(),
        },
    };

    let totals = totals_for(&state, &items);
    let outcome = state.gateway().charge(details, totals.total).await?;

    let order_status = match outcome.status {
        PaymentStatus::Succeeded => OrderStatus::Paid,
        PaymentStatus::Pending => OrderStatus::Placed,
        PaymentStatus::Failed => OrderStatus::Failed,
    };

    let order_id = OrderRepository::new(state.pool())
        .place_order(
            user.id,
            &items,
            &totals,
            order_status,
            &shipping,
            &PaymentRecord {
                transaction_ref: &outcome.transaction_ref,
                method: details.method(),
                status: outcome.status,
            },
            outcome.is_accepted(),
        )
        .await?;

    if outcome.is_accepted() {
        session
            .insert(session_keys::LAST_ORDER_ID, order_id)
            .await?;
        set_step(&session, CheckoutStep::Confirmation).await?;

        tracing::info!(order_id = %order_id, status = ?order_status, "order placed");

        Ok(Redirect::to("/checkout").into_response())
    } else {
        tracing::warn!(order_id = %order_id, "payment declined");

        Ok(Redirect::to("/checkout?error=payment_declined").into_response())
    }
}

/// Step back to the previous wizard step.
pub async fn back(session: Session, RequireAuth(_user): RequireAuth) -> Result<Response> {
    let step = current_step(&session).await;
    set_step(&session, step.back()).await?;

    let target = if step.back() == CheckoutStep::Cart {
        "/cart"
    } else {
        "/checkout"
    };

    Ok(Redirect::to(target).into_response())
}

/// Reset the wizard to the cart step ("continue shopping").
pub async fn reset(session: Session, RequireAuth(_user): RequireAuth) -> Result<Response> {
    set_step(&session, CheckoutStep::Cart).await?;
    let _ = session
        .remove::<ShippingAddress>(session_keys::SHIPPING_ADDRESS)
        .await;

    Ok(Redirect::to("/").into_response())
}
