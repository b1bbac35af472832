//! Checkout Domain Module
//!
//! This module contains the checkout flow, including:
//! - Wire models (CheckoutRequest, gateway envelope, customer fields)
//! - The payment-initiation collaborator interface
//! - The orchestrator state machine from cart review to gateway redirect
//! - REST API handlers for the checkout step

pub mod gateway;
pub mod handlers;
pub mod models;
pub mod orchestrator;

// Re-export commonly used types for convenience
pub use gateway::{GatewayError, PaymentGateway};
pub use handlers::routes;
pub use models::{CheckoutItem, CheckoutRequest, CustomerInfo};
pub use orchestrator::{CheckoutError, CheckoutFlow, CheckoutStage};
