//! Actor Context
//!
//! The identity collaborator is external; the server only needs a display
//! name for audit stamps. A middleware reads it from the `x-actor` header
//! and injects it as an extension, defaulting to "system".

use axum::{extract::Request, middleware::Next, response::Response};

pub const ACTOR_HEADER: &str = "x-actor";
const DEFAULT_ACTOR: &str = "system";

/// Acting user's display name, opaque to the catalogue
#[derive(Debug, Clone)]
pub struct CurrentActor(pub String);

impl CurrentActor {
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Inject the acting user's name into request extensions
pub async fn inject_actor(mut req: Request, next: Next) -> Response {
    let actor = req
        .headers()
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_ACTOR)
        .to_string();
    req.extensions_mut().insert(CurrentActor(actor));
    next.run(req).await
}
