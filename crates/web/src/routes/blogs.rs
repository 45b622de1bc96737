//! Blog route handlers.
//!
//! Posts have markdown bodies rendered with comrak. Unpublished drafts
//! are visible to their author only.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use craftloom_core::BlogId;

use crate::db::blogs::{BlogInput, BlogRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{Blog, CurrentUser};
use crate::state::AppState;

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Blog post form data.
#[derive(Debug, Deserialize)]
pub struct BlogForm {
    pub title: String,
    pub body: String,
    /// Checkbox; absent when unchecked.
    pub published: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Blog listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "blogs/index.html")]
pub struct BlogIndexTemplate {
    pub current_user: Option<CurrentUser>,
    pub blogs: Vec<Blog>,
}

/// Blog detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "blogs/show.html")]
pub struct BlogShowTemplate {
    pub current_user: Option<CurrentUser>,
    pub blog: Blog,
    /// Body markdown rendered to HTML.
    pub body_html: String,
    pub is_owner: bool,
}

/// Blog create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "blogs/form.html")]
pub struct BlogFormTemplate {
    pub current_user: Option<CurrentUser>,
    /// `None` for the create form.
    pub blog: Option<Blog>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display published posts.
#[instrument(skip(state, current_user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let blogs = BlogRepository::new(state.pool()).list_published().await?;

    Ok(BlogIndexTemplate {
        current_user,
        blogs,
    })
}

/// Display one post with its body rendered from markdown.
///
/// Drafts 404 for everyone except their author.
#[instrument(skip(state, current_user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Path(id): Path<BlogId>,
) -> Result<Response> {
    let Some(blog) = BlogRepository::new(state.pool()).get(id).await? else {
        return Err(AppError::NotFound(format!("blog post {id}")));
    };

    let is_owner = current_user.as_ref().is_some_and(|u| u.id == blog.author_id);

    if !blog.published && !is_owner {
        return Err(AppError::NotFound(format!("blog post {id}")));
    }

    let body_html = comrak::markdown_to_html(&blog.body, &comrak::Options::default());

    Ok(BlogShowTemplate {
        current_user,
        blog,
        body_html,
        is_owner,
    }
    .into_response())
}

/// Display the new post form.
pub async fn new_form(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    BlogFormTemplate {
        current_user: Some(user),
        blog: None,
        error: query.error,
    }
}

/// Create a post.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<BlogForm>,
) -> Result<Response> {
    if form.title.trim().is_empty() {
        return Ok(Redirect::to("/blog/new?error=missing_title").into_response());
    }

    let id = BlogRepository::new(state.pool())
        .create(
            user.id,
            &BlogInput {
                title: form.title.trim(),
                body: &form.body,
                published: form.published.is_some(),
            },
        )
        .await?;

    tracing::info!(blog_id = %id, "blog post created");

    Ok(Redirect::to(&format!("/blog/{id}")).into_response())
}

/// Display the edit form for an owned post.
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<BlogId>,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    let Some(blog) = BlogRepository::new(state.pool()).get(id).await? else {
        return Err(AppError::NotFound(format!("blog post {id}")));
    };

    if blog.author_id != user.id {
        return Err(AppError::Forbidden("not your post".to_string()));
    }

    Ok(BlogFormTemplate {
        current_user: Some(user),
        blog: Some(blog),
        error: query.error,
    }
    .into_response())
}

/// Update an owned post.
#[instrument(skip_all, fields(user_id = %user.id, blog_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<BlogId>,
    Form(form): Form<BlogForm>,
) -> Result<Response> {
    BlogRepository::new(state.pool())
        .update(
            id,
            user.id,
            &BlogInput {
                title: form.title.trim(),
                body: &form.body,
                published: form.published.is_some(),
            },
        )
        .await?;

    Ok(Redirect::to(&format!("/blog/{id}")).into_response())
}

/// Delete an owned post.
#[instrument(skip_all, fields(user_id = %user.id, blog_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<BlogId>,
) -> Result<Response> {
    BlogRepository::new(state.pool()).delete(id, user.id).await?;

    tracing::info!("blog post deleted");

    Ok(Redirect::to("/blog").into_response())
}
