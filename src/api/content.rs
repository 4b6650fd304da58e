//! Handlers for tool-associated content: blogs, prompts, and guides, plus
//! the favorites stub.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::api::auth::require_auth;
use crate::error::ApiError;
use crate::models::{Blog, BlogPatch, Guide, Id, NewBlog, NewGuide, NewPrompt, Prompt, PromptPatch};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBlogRequest {
    pub tool_id: Option<Id>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// POST /api/blogs
pub async fn submit_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SubmitBlogRequest>,
) -> Result<(StatusCode, Json<Blog>), ApiError> {
    require_auth(&state.config, &headers)?;

    let (Some(tool_id), Some(title), Some(content)) = (
        req.tool_id,
        non_empty(req.title),
        non_empty(req.content),
    ) else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };

    let mut store = state.store.write();
    let blog = store.create_blog(NewBlog {
        tool_id,
        title,
        content,
    });
    Ok((StatusCode::CREATED, Json(blog)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPromptRequest {
    pub tool_id: Option<Id>,
    pub title: Option<String>,
    pub prompt_text: Option<String>,
    /// Organizational grouping required by the submission form; not stored.
    pub category: Option<String>,
}

/// POST /api/prompts
pub async fn submit_prompt(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SubmitPromptRequest>,
) -> Result<(StatusCode, Json<Prompt>), ApiError> {
    require_auth(&state.config, &headers)?;

    let (Some(tool_id), Some(title), Some(prompt_text)) = (
        req.tool_id,
        non_empty(req.title),
        non_empty(req.prompt_text),
    ) else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };

    if non_empty(req.category).is_none() {
        return Err(ApiError::Validation(
            "Category is required for organization".to_string(),
        ));
    }

    let mut store = state.store.write();
    let prompt = store.create_prompt(NewPrompt {
        tool_id,
        title,
        prompt_text,
    });
    Ok((StatusCode::CREATED, Json(prompt)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitGuideRequest {
    pub tool_id: Option<Id>,
    pub title: Option<String>,
    pub steps: Option<Vec<String>>,
}

/// POST /api/guides
pub async fn submit_guide(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SubmitGuideRequest>,
) -> Result<(StatusCode, Json<Guide>), ApiError> {
    require_auth(&state.config, &headers)?;

    let (Some(tool_id), Some(title), Some(steps)) =
        (req.tool_id, non_empty(req.title), req.steps)
    else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };

    let mut store = state.store.write();
    let guide = store.create_guide(NewGuide {
        tool_id,
        title,
        steps,
    });
    Ok((StatusCode::CREATED, Json(guide)))
}

/// PUT /api/blogs/:id
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    headers: HeaderMap,
    Json(patch): Json<BlogPatch>,
) -> Result<Json<Blog>, ApiError> {
    require_auth(&state.config, &headers)?;
    let mut store = state.store.write();
    let blog = store.update_blog(id, patch)?;
    Ok(Json(blog))
}

/// PUT /api/prompts/:id
pub async fn update_prompt(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    headers: HeaderMap,
    Json(patch): Json<PromptPatch>,
) -> Result<Json<Prompt>, ApiError> {
    require_auth(&state.config, &headers)?;
    let mut store = state.store.write();
    let prompt = store.update_prompt(id, patch)?;
    Ok(Json(prompt))
}

/// DELETE /api/blogs/:id
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_auth(&state.config, &headers)?;
    let mut store = state.store.write();
    store.delete_blog(id)?;
    Ok(Json(json!({ "message": "Blog deleted successfully" })))
}

/// DELETE /api/prompts/:id
pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_auth(&state.config, &headers)?;
    let mut store = state.store.write();
    store.delete_prompt(id)?;
    Ok(Json(json!({ "message": "Prompt deleted successfully" })))
}

/// GET /api/user/favorites - favorites are not implemented yet; the route
/// exists so the client contract holds.
pub async fn list_favorites(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Id>>, ApiError> {
    require_auth(&state.config, &headers)?;
    Ok(Json(Vec::new()))
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}
