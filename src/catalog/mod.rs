//! Product Catalog Domain Module
//!
//! This module contains everything related to the sellable product catalog:
//! - Domain models (Product, categories, sort modes)
//! - The startup loader that fetches products from the catalog collaborator
//! - The pure filter/sort engine
//! - REST API handlers for browsing the catalog

pub mod filter;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod source;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use loader::{CatalogLoader, CatalogState};
pub use models::{Category, CategoryFilter, Product, SortMode};
pub use source::ProductSource;
