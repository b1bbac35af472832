//! Payment-initiation collaborator interface.
//!
//! The gateway contract is narrow: POST the checkout request, parse the body
//! as the success/error envelope regardless of HTTP status, and hand back
//! whatever redirect link it issued. Tests inject a [`PaymentGateway`] fake
//! instead of the HTTP implementation.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::models::{CheckoutRequest, GatewayEnvelope};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("payment service unreachable: {0}")]
    Transport(String),
}

/// Collaborator that turns a checkout request into a payment redirect.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initiate(&self, request: &CheckoutRequest) -> Result<GatewayEnvelope, GatewayError>;
}

/// HTTP implementation posting to the real payment endpoint.
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPaymentGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn initiate(&self, request: &CheckoutRequest) -> Result<GatewayEnvelope, GatewayError> {
        debug!(items = request.items.len(), "posting checkout request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        // The gateway answers with the JSON envelope on non-2xx statuses
        // too, so the body is parsed before the status is considered.
        response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }
}
