//! Artwork route handlers.
//!
//! Listing, detail, and owner-only create/edit/delete. Creation and
//! editing accept a multipart form so an image can ride along.

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

use craftloom_core::{ArtworkId, Price};

use crate::db::artworks::{ArtworkInput, ArtworkRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{Artwork, CurrentUser};
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

/// Artwork listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "artworks/index.html")]
pub struct ArtworkIndexTemplate {
    pub current_user: Option<CurrentUser>,
    pub artworks: Vec<Artwork>,
}

/// Artwork detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "artworks/show.html")]
pub struct ArtworkShowTemplate {
    pub current_user: Option<CurrentUser>,
    pub artwork: Artwork,
    /// Whether the viewer owns this listing.
    pub is_owner: bool,
}

/// Artwork create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "artworks/form.html")]
pub struct ArtworkFormTemplate {
    pub current_user: Option<CurrentUser>,
    /// `None` for the create form.
    pub artwork: Option<Artwork>,
    pub error: Option<String>,
}

// =============================================================================
// Multipart Form
// =============================================================================

/// Parsed artwork form fields.
struct ArtworkForm {
    title: String,
    description: String,
    price: Decimal,
    medium: String,
    image: Option<(String, Vec<u8>)>,
}

/// Read the multipart artwork form.
async fn read_form(mut multipart: Multipart) -> Result<ArtworkForm> {
    let mut title = None;
    let mut description = None;
    let mut price = None;
    let mut medium = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(String::from) else {
            continue;
        };

        match name.as_str() {
            "title" => title = Some(read_text(field).await?),
            "description" => description = Some(read_text(field).await?),
            "price" => {
                let raw = read_text(field).await?;
                let parsed = Decimal::from_str(raw.trim())
                    .map_err(|_| AppError::BadRequest("invalid price".to_string()))?;
                let parsed =
                    Price::new(parsed).map_err(|e| AppError::BadRequest(e.to_string()))?;
                price = Some(parsed.amount());
            }
            "medium" => medium = Some(read_text(field).await?),
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

    Ok(ArtworkForm {
        title: require_field(title, "title")?,
        description: description.unwrap_or_default(),
        price: price.ok_or_else(|| AppError::BadRequest("missing price".to_string()))?,
        medium: require_field(medium, "medium")?,
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

/// Display the artwork listing.
#[instrument(skip(state, current_user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let artworks = ArtworkRepository::new(state.pool()).list().await?;

    Ok(ArtworkIndexTemplate {
        current_user,
        artworks,
    })
}

/// Display one artwork.
#[instrument(skip(state, current_user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Path(id): Path<ArtworkId>,
) -> Result<Response> {
    let Some(artwork) = ArtworkRepository::new(state.pool()).get(id).await? else {
        return Err(AppError::NotFound(format!("artwork {id}")));
    };

    let is_owner = current_user
        .as_ref()
        .is_some_and(|u| u.id == artwork.artist_id);

    Ok(ArtworkShowTemplate {
        current_user,
        artwork,
        is_owner,
    }
    .into_response())
}

/// Display the new artwork form.
pub async fn new_form(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    ArtworkFormTemplate {
        current_user: Some(user),
        artwork: None,
        error: query.error,
    }
}

/// Create an artwork from the multipart form.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_form(multipart).await?;
    let image_path = store_image(&state, form.image).await?;

    let id = ArtworkRepository::new(state.pool())
        .create(
            user.id,
            &ArtworkInput {
                title: &form.title,
                description: &form.description,
                price: form.price,
                medium: &form.medium,
                image_path: image_path.as_deref(),
            },
        )
        .await?;

    tracing::info!(artwork_id = %id, "artwork created");

    Ok(Redirect::to(&format!("/artworks/{id}")).into_response())
}

/// Display the edit form for an owned artwork.
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ArtworkId>,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    let Some(artwork) = ArtworkRepository::new(state.pool()).get(id).await? else {
        return Err(AppError::NotFound(format!("artwork {id}")));
    };

    if artwork.artist_id != user.id {
        return Err(AppError::Forbidden("not your listing".to_string()));
    }

    Ok(ArtworkFormTemplate {
        current_user: Some(user),
        artwork: Some(artwork),
        error: query.error,
    }
    .into_response())
}

/// Update an owned artwork from the multipart form.
///
/// Omitting the image keeps the existing one.
#[instrument(skip_all, fields(user_id = %user.id, artwork_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ArtworkId>,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_form(multipart).await?;
    let image_path = store_image(&state, form.image).await?;

    ArtworkRepository::new(state.pool())
        .update(
            id,
            user.id,
            &ArtworkInput {
                title: &form.title,
                description: &form.description,
                price: form.price,
                medium: &form.medium,
                image_path: image_path.as_deref(),
            },
        )
        .await?;

    Ok(Redirect::to(&format!("/artworks/{id}")).into_response())
}

/// Soft-delete an owned artwork.
#[instrument(skip_all, fields(user_id = %user.id, artwork_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<ArtworkId>,
) -> Result<Response> {
    ArtworkRepository::new(state.pool()).delete(id, user.id).await?;

    tracing::info!("artwork deleted");

    Ok(Redirect::to("/artworks").into_response())
}
