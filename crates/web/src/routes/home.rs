//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::db::{ArtworkRepository, BlogRepository, MaterialRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::{Artwork, Blog, CurrentUser, Material};
use crate::state::AppState;

/// Number of items to feature per section.
const FEATURED_PER_SECTION: usize = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub current_user: Option<CurrentUser>,
    /// Most recent active artworks.
    pub artworks: Vec<Artwork>,
    /// Most recent material listings.
    pub materials: Vec<Material>,
    /// Most recent published blog posts.
    pub blogs: Vec<Blog>,
}

/// Display the home page.
#[instrument(skip(state, current_user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let mut artworks = ArtworkRepository::new(state.pool()).list().await?;
    artworks.truncate(FEATURED_PER_SECTION);

    let mut materials = MaterialRepository::new(state.pool()).list().await?;
    materials.truncate(FEATURED_PER_SECTION);

    let mut blogs = BlogRepository::new(state.pool()).list_published().await?;
    blogs.truncate(FEATURED_PER_SECTION);

    Ok(HomeTemplate {
        current_user,
        artworks,
        materials,
        blogs,
    })
}
