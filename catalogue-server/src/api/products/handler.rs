//! Product API Handlers
//!
//! Listing goes through the filtered-pagination policy; deletion is
//! always soft. GET by id returns the detail view with assignment flags,
//! inactive products included.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};

use crate::api::actor::CurrentActor;
use crate::core::ServerState;
use crate::services::ProductDetail;
use crate::utils::AppResult;
use shared::models::{Page, PageQuery, Product, ProductCreate, ProductUpdate};

/// GET /api/products?search=&filter=&page= - paged listing of active products
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Product>>> {
    let page = state.products.list_page(&query).await?;
    Ok(Json(page))
}

/// GET /api/products/by-category/:category_id - active products in a category
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<i64>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state.products.list_by_category(category_id).await?;
    Ok(Json(products))
}

/// GET /api/products/:id - detail view, soft-deleted products included
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductDetail>> {
    let detail = state.products.detail(id).await?;
    Ok(Json(detail))
}

/// POST /api/products - create product with an optional category selection
pub async fn create(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let product = state.products.create(payload, actor.name()).await?;
    Ok(Json(product))
}

/// PUT /api/products/:id - update fields and reconcile the selection
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Extension(actor): Extension<CurrentActor>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let product = state.products.update(id, payload, actor.name()).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - soft delete; the row is kept inactive
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Extension(actor): Extension<CurrentActor>,
) -> AppResult<Json<Product>> {
    let product = state.products.delete(id, actor.name()).await?;
    Ok(Json(product))
}
