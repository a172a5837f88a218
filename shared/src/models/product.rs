//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// Deleting a product never removes the row; it flips `is_active` to false.
/// Inactive products stay reachable by id but are excluded from listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    /// Opaque image key, resolved to a locator by the storage service
    pub image_name: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub created_by: String,
    pub modified_at: i64,
    pub modified_by: String,
    /// Optimistic-concurrency token, incremented on every update
    pub version: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub sku: String,
    pub name: String,
    pub image_name: Option<String>,
    /// Category ids to assign, string-encoded. Absent means no assignments.
    pub selected_categories: Option<Vec<String>>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub sku: String,
    pub name: String,
    pub image_name: Option<String>,
    /// Desired category selection. Absent clears every association;
    /// callers must round-trip the previous selection to keep it.
    pub selected_categories: Option<Vec<String>>,
    /// Version of the row the caller last read
    pub version: i64,
}

/// Join row: "product belongs to category"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductCategory {
    pub product_id: i64,
    pub category_id: i64,
}

/// Category with per-product assigned flag (for edit/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedCategory {
    pub category_id: i64,
    pub category_name: String,
    pub assigned: bool,
}
