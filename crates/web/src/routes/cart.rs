//! Shopping cart route handlers.
//!
//! The cart belongs to the logged-in user and lives in the database;
//! totals are recomputed from the lines on every view.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use craftloom_core::{ArtworkId, CartItemId, CartLine, CartTotals, ItemKind, MaterialId};

use crate::db::{ArtworkRepository, CartRepository, MaterialRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{CartItem, CurrentUser};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    /// `artwork` or `material`.
    pub kind: String,
    pub item_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

/// Quantity update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub cart_item_id: CartItemId,
    pub quantity: i32,
}

/// Line removal form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub cart_item_id: CartItemId,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub current_user: Option<CurrentUser>,
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

/// Compute totals for a set of cart rows under the configured policy.
pub fn totals_for(state: &AppState, items: &[CartItem]) -> CartTotals {
    let lines: Vec<CartLine> = items
        .iter()
        .map(|i| CartLine {
            unit_price: i.unit_price,
            quantity: i.quantity,
        })
        .collect();
    CartTotals::compute(&lines, &state.config().pricing)
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart with computed totals.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let items = CartRepository::new(state.pool()).list(user.id).await?;
    let totals = totals_for(&state, &items);

    Ok(CartTemplate {
        current_user: Some(user),
        items,
        totals,
    })
}

/// Add a listing to the cart, snapshotting its title and price.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<AddForm>,
) -> Result<Response> {
    if form.quantity < 1 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
    }

    let cart = CartRepository::new(state.pool());

    match form.kind.as_str() {
        "artwork" => {
            let Some(artwork) = ArtworkRepository::new(state.pool())
                .get(ArtworkId::from(form.item_id))
                .await?
            else {
                return Err(AppError::NotFound(format!("artwork {}", form.item_id)));
            };

            cart.add(
                user.id,
                ItemKind::Artwork,
                form.item_id,
                &artwork.title,
                artwork.price,
                form.quantity,
            )
            .await?;
        }
        "material" => {
            let Some(material) = MaterialRepository::new(state.pool())
                .get(MaterialId::from(form.item_id))
                .await?
            else {
                return Err(AppError::NotFound(format!("material {}", form.item_id)));
            };

            cart.add(
                user.id,
                ItemKind::Material,
                form.item_id,
                &material.name,
                material.price,
                form.quantity,
            )
            .await?;
        }
        other => {
            return Err(AppError::BadRequest(format!("unknown item kind {other:?}")));
        }
    }

    tracing::info!(kind = %form.kind, item_id = form.item_id, "added to cart");

    Ok(Redirect::to("/cart").into_response())
}

/// Update a line's quantity. A quantity of zero removes the line.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<UpdateForm>,
) -> Result<Response> {
    let cart = CartRepository::new(state.pool());

    if form.quantity < 1 {
        cart.remove(form.cart_item_id, user.id).await?;
    } else {
        cart.set_quantity(form.cart_item_id, user.id, form.quantity)
            .await?;
    }

    Ok(Redirect::to("/cart").into_response())
}

/// Remove a line from the cart.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<RemoveForm>,
) -> Result<Response> {
    CartRepository::new(state.pool())
        .remove(form.cart_item_id, user.id)
        .await?;

    Ok(Redirect::to("/cart").into_response())
}

/// Cart count badge fragment: the total item quantity as plain text.
pub async fn count(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let count = CartRepository::new(state.pool()).count(user.id).await?;
    Ok(count.to_string())
}
