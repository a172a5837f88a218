//! Domain Models
//!
//! Catalogue entities and the payload/page types exchanged over the API.
//! `sqlx::FromRow` derives are behind the `db` feature so API consumers
//! don't pull in the database stack.

pub mod category;
pub mod page;
pub mod product;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use page::{Page, PageQuery};
pub use product::{
    AssignedCategory, Product, ProductCategory, ProductCreate, ProductUpdate,
};
