use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::models::{Category, Tool};
use crate::state::AppState;

/// GET /api/categories - List all categories
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    let store = state.store.read();
    Json(store.categories())
}

/// GET /api/categories/:slug/tools - Tools in one category, 404 if the
/// category slug is unknown
pub async fn category_tools(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<Tool>>, ApiError> {
    let store = state.store.read();
    let category = store
        .category_by_slug(&slug)
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;
    Ok(Json(store.tools_by_category(category.id)))
}
