//! Material route handlers.
//!
//! Same shape as the artwork routes, plus a stock quantity field.
//! Materials are hard-deleted.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use craftloom_core::{MaterialId, Price};

use crate::db::materials::{MaterialInput, MaterialRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{CurrentUser, Material};
use crate::services::uploads;
use crate::state::AppState;

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Material listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "materials/index.html")]
pub struct MaterialIndexTemplate {
    pub current_user: Option<CurrentUser>,
    pub materials: Vec<Material>,
}

/// Material detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "materials/show.html")]
pub struct MaterialShowTemplate {
    pub current_user: Option<CurrentUser>,
    pub material: Material,
    /// Whether the viewer owns this listing.
    pub is_owner: bool,
}

/// Material create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "materials/form.html")]
pub struct MaterialFormTemplate {
    pub current_user: Option<CurrentUser>,
    /// `None` for the create form.
    pub material: Option<Material>,
    pub error: Option<String>,
}

// =============================================================================
// Multipart Form
// =============================================================================

/// Parsed material form fields.
struct MaterialForm {
    name: String,
    description: String,
    price: Decimal,
    quantity_available: i32,
    category: String,
    image: Option<(String, Vec<u8>)>,
}

/// Read the multipart material form.
async fn read_form(mut multipart: Multipart) -> Result<MaterialForm> {
    let mut name = None;
    let mut description = None;
    let mut price = None;
    let mut quantity_available = None;
    let mut category = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(field_name) = field.name().map(String::from) else {
            continue;
        };

        match field_name.as_str() {
            "name" => name = Some(read_text(field).await?),
            "description" => description = Some(read_text(field).await?),
            "price" => {
                let raw = read_text(field).await?;
                let parsed = Decimal::from_str(raw.trim())
                    .map_err(|_| AppError::BadRequest("invalid price".to_string()))?;
                let parsed =
                    Price::new(parsed).map_err(|e| AppError::BadRequest(e.to_string()))?;
                price = Some(parsed.amount());
            }
            "quantity_available" => {
                let raw = read_text(field).await?;
                let parsed: i32 = raw
                    .trim()
                    .parse()
                    .map_err(|_| AppError::BadRequest("invalid quantity".to_string()))?;
                if parsed < 0 {
                    return Err(AppError::BadRequest(
                        "quantity must not be negative".to_string(),
                    ));
                }
                quantity_available = Some(parsed);
            }
            "category" => category = Some(read_text(field).await?),
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // An empty file input still submits a nameless part
                if !filename.is_empty() && !data.is_empty() {
                    image = Some((filename, data.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(MaterialForm {
        name: require_field(name, "name")?,
        description: description.unwrap_or_default(),
        price: price.ok_or_else(|| AppError::BadRequest("missing price".to_string()))?,
        quantity_available: quantity_available
            .ok_or_else(|| AppError::BadRequest("missing quantity".to_string()))?,
        category: require_field(category, "category")?,
        image,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn require_field(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("missing {name}"))),
    }
}

/// Store the uploaded image, if any, returning its public path.
async fn store_image(
    state: &AppState,
    image: Option<(String, Vec<u8>)>,
) -> Result<Option<String>> {
    match image {
        Some((filename, data)) => {
            let path =
                uploads::save_image(&state.config().uploads_dir, &filename, &data).await?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the material listing.
#[instrument(skip(state, current_user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let materials = MaterialRepository::new(state.pool()).list().await?;

    Ok(MaterialIndexTemplate {
        current_user,
        materials,
    })
}

/// Display one material.
#[instrument(skip(state, current_user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Path(id): Path<MaterialId>,
) -> Result<Response> {
    let Some(material) = MaterialRepository::new(state.pool()).get(id).await? else {
        return Err(AppError::NotFound(format!("material {id}")));
    };

    let is_owner = current_user
        .as_ref()
        .is_some_and(|u| u.id == material.seller_id);

    Ok(MaterialShowTemplate {
        current_user,
        material,
        is_owner,
    }
    .into_response())
}

/// Display the new material form.
pub async fn new_form(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    MaterialFormTemplate {
        current_user: Some(user),
        material: None,
        error: query.error,
    }
}

/// Create a material from the multipart form.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_form(multipart).await?;
    let image_path = store_image(&state, form.image).await?;

    let id = MaterialRepository::new(state.pool())
        .create(
            user.id,
            &MaterialInput {
                name: &form.name,
                description: &form.description,
                price: form.price,
                quantity_available: form.quantity_available,
                category: &form.category,
                image_path: image_path.as_deref(),
            },
        )
        .await?;

    tracing::info!(material_id = %id, "material created");

    Ok(Redirect::to(&format!("/materials/{id}")).into_response())
}

/// Display the edit form for an owned material.
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<MaterialId>,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    let Some(material) = MaterialRepository::new(state.pool()).get(id).await? else {
        return Err(AppError::NotFound(format!("material {id}")));
    };

    if material.seller_id != user.id {
        return Err(AppError::Forbidden("not your listing".to_string()));
    }

    Ok(MaterialFormTemplate {
        current_user: Some(user),
        material: Some(material),
        error: query.error,
    }
    .into_response())
}

/// Update an owned material from the multipart form.
///
/// Omitting the image keeps the existing one.
#[instrument(skip_all, fields(user_id = %user.id, material_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<MaterialId>,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_form(multipart).await?;
    let image_path = store_image(&state, form.image).await?;

    MaterialRepository::new(state.pool())
        .update(
            id,
            user.id,
            &MaterialInput {
                name: &form.name,
                description: &form.description,
                price: form.price,
                quantity_available: form.quantity_available,
                category: &form.category,
                image_path: image_path.as_deref(),
            },
        )
        .await?;

    Ok(Redirect::to(&format!("/materials/{id}")).into_response())
}

/// Hard-delete an owned material.
#[instrument(skip_all, fields(user_id = %user.id, material_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<MaterialId>,
) -> Result<Response> {
    MaterialRepository::new(state.pool())
        .delete(id, user.id)
        .await?;

    tracing::info!("material deleted");

    Ok(Redirect::to("/materials").into_response())
}
