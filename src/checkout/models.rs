//! Checkout Wire Models

use serde::{Deserialize, Serialize};

/// One cart line as submitted to the order backend: identifier and quantity
/// only. The product snapshot is never re-sent; the backend is the source
/// of truth for current price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub product_id: String,
    pub quantity: u32,
}

/// Customer contact fields entered during checkout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
}

/// Payment-initiation request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
}

/// Envelope the payment gateway answers with, on any HTTP status.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<GatewayData>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayData {
    /// Redirect URL the customer must be sent to, verbatim.
    pub payment_link: String,
}
