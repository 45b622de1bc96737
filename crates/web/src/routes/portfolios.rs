//! Artist portfolio route handlers.
//!
//! A portfolio page shows the artist's bio alongside their active
//! artwork listings. Each user has at most one portfolio, edited
//! through a single upsert form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use craftloom_core::UserId;

use crate::db::portfolios::{PortfolioInput, PortfolioRepository};
use crate::db::ArtworkRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{Artwork, CurrentUser, Portfolio};
use crate::state::AppState;

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Portfolio form data.
#[derive(Debug, Deserialize)]
pub struct PortfolioForm {
    pub bio: String,
    pub website: Option<String>,
    pub specialty: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Portfolio listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "portfolios/index.html")]
pub struct PortfolioIndexTemplate {
    pub current_user: Option<CurrentUser>,
    pub portfolios: Vec<Portfolio>,
}

/// Portfolio detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "portfolios/show.html")]
pub struct PortfolioShowTemplate {
    pub current_user: Option<CurrentUser>,
    pub portfolio: Portfolio,
    /// The artist's active artwork listings.
    pub artworks: Vec<Artwork>,
    pub is_owner: bool,
}

/// Portfolio edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "portfolios/form.html")]
pub struct PortfolioFormTemplate {
    pub current_user: Option<CurrentUser>,
    /// `None` when the user has no portfolio yet.
    pub portfolio: Option<Portfolio>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display all portfolios.
#[instrument(skip(state, current_user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let portfolios = PortfolioRepository::new(state.pool()).list().await?;

    Ok(PortfolioIndexTemplate {
        current_user,
        portfolios,
    })
}

/// Display one artist's portfolio with their listings.
#[instrument(skip(state, current_user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Path(artist_id): Path<UserId>,
) -> Result<Response> {
    let Some(portfolio) = PortfolioRepository::new(state.pool())
        .get_by_artist(artist_id)
        .await?
    else {
        return Err(AppError::NotFound(format!("portfolio for user {artist_id}")));
    };

    let artworks = ArtworkRepository::new(state.pool())
        .list_by_artist(artist_id)
        .await?;

    let is_owner = current_user.as_ref().is_some_and(|u| u.id == artist_id);

    Ok(PortfolioShowTemplate {
        current_user,
        portfolio,
        artworks,
        is_owner,
    }
    .into_response())
}

/// Display the portfolio edit form, pre-filled if one exists.
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    let portfolio = PortfolioRepository::new(state.pool())
        .get_by_artist(user.id)
        .await?;

    Ok(PortfolioFormTemplate {
        current_user: Some(user),
        portfolio,
        error: query.error,
    }
    .into_response())
}

/// Create or update the caller's portfolio.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<PortfolioForm>,
) -> Result<Response> {
    if form.bio.trim().is_empty() {
        return Ok(Redirect::to("/portfolio/edit?error=missing_bio").into_response());
    }

    let website = form.website.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let specialty = form
        .specialty
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    PortfolioRepository::new(state.pool())
        .upsert(
            user.id,
            &PortfolioInput {
                bio: form.bio.trim(),
                website,
                specialty,
            },
        )
        .await?;

    tracing::info!("portfolio saved");

    Ok(Redirect::to(&format!("/portfolios/{}", user.id)).into_response())
}
