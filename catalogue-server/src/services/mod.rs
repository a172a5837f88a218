//! Service Layer
//!
//! Policy lives here: reconciliation, soft-delete, pagination windows and
//! the opaque storage collaborator. Handlers stay thin.

pub mod categories;
pub mod products;
pub mod storage;

pub use categories::CategoriesService;
pub use products::{ProductDetail, ProductsService};
pub use storage::{ImageStorage, LocalImageStorage, StorageError, StorageResult};
