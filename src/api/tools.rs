use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::api::auth::require_auth;
use crate::error::ApiError;
use crate::models::{
    slugify, Id, NewTool, PricingType, SearchResponse, SeoMeta, Tool, ToolPatch, ToolWithDetails,
};
use crate::search;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListToolsQuery {
    /// Search string; when present the response is a `SearchResponse`
    pub q: Option<String>,
    /// "true" requests the AI ranking pass
    pub ai: Option<String>,
    pub category_id: Option<Id>,
}

/// GET /api/tools - list, category-filter, or search.
///
/// With `q` the substring candidates go through the ranked-search pipeline
/// and the body is `{query, results, aiEnhanced, message?, error?}`;
/// otherwise a plain `Tool[]`.
pub async fn list_tools(
    State(state): State<AppState>,
    Query(params): Query<ListToolsQuery>,
) -> Response {
    let query = params.q.as_deref().unwrap_or("").to_string();

    if !query.is_empty() {
        let use_ai = params.ai.as_deref() == Some("true");

        // Candidates are cloned out so the store lock is not held across
        // the ranking call.
        let candidates = {
            let store = state.store.read();
            store.search_tools(&query)
        };

        let outcome = search::ranked_search(
            &state.http_client,
            &state.config.llm,
            Duration::from_secs(state.config.rank_timeout_secs),
            &query,
            candidates,
            use_ai,
        )
        .await;

        return Json(SearchResponse {
            query,
            results: outcome.results,
            ai_enhanced: outcome.ai_enhanced,
            message: outcome.message,
            error: outcome.error,
        })
        .into_response();
    }

    let store = state.store.read();
    let tools = match params.category_id {
        Some(category_id) => store.tools_by_category(category_id),
        None => store.tools(),
    };
    Json(tools).into_response()
}

/// GET /api/tools/featured
pub async fn featured_tools(State(state): State<AppState>) -> Json<Vec<Tool>> {
    let store = state.store.read();
    Json(store.featured_tools())
}

/// GET /api/tools/:slug - tool joined with category, blog, prompts, guide
pub async fn tool_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ToolWithDetails>, ApiError> {
    let store = state.store.read();
    store
        .tool_with_details_by_slug(&slug)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Tool not found".to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitToolRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Id>,
    pub website_url: Option<String>,
    pub affiliate_url: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<i32>,
    /// Validated against {free, freemium, paid}; kept as a raw string so an
    /// unknown value is a 400, not a body-deserialization failure.
    pub pricing_type: Option<String>,
    pub seo: Option<SeoMeta>,
}

/// POST /api/tools/submit - validated tool submission.
///
/// All checks run before the store is touched: required fields, pricing
/// type, rating range, then case-insensitive duplicate detection on name
/// and website URL.
pub async fn submit_tool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SubmitToolRequest>,
) -> Result<(StatusCode, Json<Tool>), ApiError> {
    require_auth(&state.config, &headers)?;

    let name = non_empty(req.name);
    let description = non_empty(req.description);
    let website_url = non_empty(req.website_url);
    let (Some(name), Some(description), Some(category_id), Some(website_url)) =
        (name, description, req.category_id, website_url)
    else {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    };

    let pricing_type = match req.pricing_type.as_deref() {
        None => PricingType::default(),
        Some("free") => PricingType::Free,
        Some("freemium") => PricingType::Freemium,
        Some("paid") => PricingType::Paid,
        Some(_) => return Err(ApiError::Validation("Invalid pricing type".to_string())),
    };

    if let Some(rating) = req.rating {
        if !(0..=5).contains(&rating) {
            return Err(ApiError::Validation(
                "Rating must be between 0 and 5".to_string(),
            ));
        }
    }

    let slug = slugify(&name);

    let mut store = state.store.write();

    // Duplicate detection: case-insensitive exact match, name checked
    // against every existing tool before any URL comparison
    let name_lower = name.to_lowercase();
    let url_lower = website_url.to_lowercase();
    let existing = store.tools();
    if existing.iter().any(|t| t.name.to_lowercase() == name_lower) {
        return Err(ApiError::Conflict(
            "A tool with this name already exists".to_string(),
        ));
    }
    if existing
        .iter()
        .any(|t| t.website_url.to_lowercase() == url_lower)
    {
        return Err(ApiError::Conflict(
            "A tool with this website URL already exists".to_string(),
        ));
    }

    let tool = store.create_tool(NewTool {
        name,
        slug,
        description,
        category_id,
        website_url,
        affiliate_url: req.affiliate_url,
        image_url: req.image_url,
        rating: req.rating,
        featured: false,
        pricing_type,
        seo: req.seo,
    });

    Ok((StatusCode::CREATED, Json(tool)))
}

/// PUT /api/tools/:id - partial-field merge update
pub async fn update_tool(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    headers: HeaderMap,
    Json(patch): Json<ToolPatch>,
) -> Result<Json<Tool>, ApiError> {
    require_auth(&state.config, &headers)?;
    let mut store = state.store.write();
    let tool = store.update_tool(id, patch)?;
    Ok(Json(tool))
}

/// DELETE /api/tools/:id
pub async fn delete_tool(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_auth(&state.config, &headers)?;
    let mut store = state.store.write();
    store.delete_tool(id)?;
    Ok(Json(json!({ "message": "Tool deleted successfully" })))
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}
