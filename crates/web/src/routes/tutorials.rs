//! Tutorial route handlers.
//!
//! Tutorial bodies are markdown, rendered with comrak on the detail
//! page. Create/edit/delete are owner-only.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use craftloom_core::{SkillLevel, TutorialId};

use crate::db::tutorials::{TutorialInput, TutorialRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{CurrentUser, Tutorial};
use crate::state::AppState;

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Tutorial form data.
#[derive(Debug, Deserialize)]
pub struct TutorialForm {
    pub title: String,
    pub body: String,
    pub skill_level: String,
    pub video_url: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Tutorial listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "tutorials/index.html")]
pub struct TutorialIndexTemplate {
    pub current_user: Option<CurrentUser>,
    pub tutorials: Vec<Tutorial>,
}

/// Tutorial detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "tutorials/show.html")]
pub struct TutorialShowTemplate {
    pub current_user: Option<CurrentUser>,
    pub tutorial: Tutorial,
    /// Body markdown rendered to HTML.
    pub body_html: String,
    pub is_owner: bool,
}

/// Tutorial create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "tutorials/form.html")]
pub struct TutorialFormTemplate {
    pub current_user: Option<CurrentUser>,
    /// `None` for the create form.
    pub tutorial: Option<Tutorial>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the tutorial listing.
#[instrument(skip(state, current_user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let tutorials = TutorialRepository::new(state.pool()).list().await?;

    Ok(TutorialIndexTemplate {
        current_user,
        tutorials,
    })
}

/// Display one tutorial with its body rendered from markdown.
#[instrument(skip(state, current_user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Path(id): Path<TutorialId>,
) -> Result<Response> {
    let Some(tutorial) = TutorialRepository::new(state.pool()).get(id).await? else {
        return Err(AppError::NotFound(format!("tutorial {id}")));
    };

    let body_html = comrak::markdown_to_html(&tutorial.body, &comrak::Options::default());

    let is_owner = current_user
        .as_ref()
        .is_some_and(|u| u.id == tutorial.author_id);

    Ok(TutorialShowTemplate {
        current_user,
        tutorial,
        body_html,
        is_owner,
    }
    .into_response())
}

/// Display the new tutorial form.
pub async fn new_form(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    TutorialFormTemplate {
        current_user: Some(user),
        tutorial: None,
        error: query.error,
    }
}

/// Create a tutorial.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<TutorialForm>,
) -> Result<Response> {
    if form.title.trim().is_empty() {
        return Ok(Redirect::to("/tutorials/new?error=missing_title").into_response());
    }

    let video_url = form.video_url.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let id = TutorialRepository::new(state.pool())
        .create(
            user.id,
            &TutorialInput {
                title: form.title.trim(),
                body: &form.body,
                skill_level: SkillLevel::from_form_value(&form.skill_level),
                video_url,
            },
        )
        .await?;

    tracing::info!(tutorial_id = %id, "tutorial created");

    Ok(Redirect::to(&format!("/tutorials/{id}")).into_response())
}

/// Display the edit form for an owned tutorial.
pub async fn edit_form(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<TutorialId>,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    let Some(tutorial) = TutorialRepository::new(state.pool()).get(id).await? else {
        return Err(AppError::NotFound(format!("tutorial {id}")));
    };

    if tutorial.author_id != user.id {
        return Err(AppError::Forbidden("not your tutorial".to_string()));
    }

    Ok(TutorialFormTemplate {
        current_user: Some(user),
        tutorial: Some(tutorial),
        error: query.error,
    }
    .into_response())
}

/// Update an owned tutorial.
#[instrument(skip_all, fields(user_id = %user.id, tutorial_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<TutorialId>,
    Form(form): Form<TutorialForm>,
) -> Result<Response> {
    let video_url = form.video_url.as_deref().map(str::trim).filter(|s| !s.is_empty());

    TutorialRepository::new(state.pool())
        .update(
            id,
            user.id,
            &TutorialInput {
                title: form.title.trim(),
                body: &form.body,
                skill_level: SkillLevel::from_form_value(&form.skill_level),
                video_url,
            },
        )
        .await?;

    Ok(Redirect::to(&format!("/tutorials/{id}")).into_response())
}

/// Delete an owned tutorial.
#[instrument(skip_all, fields(user_id = %user.id, tutorial_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<TutorialId>,
) -> Result<Response> {
    TutorialRepository::new(state.pool())
        .delete(id, user.id)
        .await?;

    tracing::info!("tutorial deleted");

    Ok(Redirect::to("/tutorials").into_response())
}
