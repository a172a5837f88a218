//! Category API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};

use crate::api::actor::CurrentActor;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Category, CategoryCreate, CategoryUpdate, Page, PageQuery};

/// GET /api/categories?search=&filter=&page= - paged category listing
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Category>>> {
    let page = state.categories.list_page(&query).await?;
    Ok(Json(page))
}

/// GET /api/categories/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = state.categories.get(id).await?;
    Ok(Json(category))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    let category = state.categories.create(payload, actor.name()).await?;
    Ok(Json(category))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Extension(actor): Extension<CurrentActor>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let category = state.categories.update(id, payload, actor.name()).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id - hard delete, join rows included
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = state.categories.delete(id).await?;
    Ok(Json(result))
}
