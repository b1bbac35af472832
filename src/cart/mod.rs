//! Shopping Cart Domain Module
//!
//! This module contains all cart business logic, including:
//! - Domain models (CartItem, money rounding)
//! - The session-local cart store with its derived total
//! - The transient "just added" feedback tracker
//! - REST API handlers for cart operations

pub mod feedback;
pub mod handlers;
pub mod models;
pub mod store;

// Re-export commonly used types for convenience
pub use feedback::FeedbackTracker;
pub use handlers::routes;
pub use models::{round_to_cents, CartItem};
pub use store::{CartError, CartStore};
