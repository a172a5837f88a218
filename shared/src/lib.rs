//! Shared types for the catalogue backend
//!
//! Domain models, page types and utility helpers used by the server crate
//! and by external consumers of the API payloads.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
