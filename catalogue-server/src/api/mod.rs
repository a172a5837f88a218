//! API Routing Module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`categories`] - category management endpoints
//! - [`products`] - product management endpoints
//! - [`upload`] - image upload endpoint
//! - [`actor`] - actor-context middleware for audit stamping

pub mod actor;

pub mod categories;
pub mod health;
pub mod products;
pub mod upload;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(categories::router())
        .merge(products::router())
        .merge(upload::router())
        .merge(health::router())
}

/// Build a fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // ========== Tower HTTP Middleware ==========
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // ========== Application Middleware ==========
        // Actor context - injected before routes for audit stamping
        .layer(axum_middleware::from_fn(actor::inject_actor))
        .with_state(state)
}
