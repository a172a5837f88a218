//! Utility module - common tools and types
//!
//! - [`AppError`] - application error type
//! - [`AppResponse`] - API response envelope
//! - logger setup

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, AppResponse};
pub use result::AppResult;
