//! Product source collaborator interface.
//!
//! The catalog is owned by an external product repository; this module
//! defines the call contract and the HTTP-backed implementation. Tests
//! inject their own [`ProductSource`] instead of hitting the network.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use super::models::Product;

/// Wire envelope returned by the catalog collaborator.
#[derive(Debug, Deserialize)]
pub struct CatalogEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<Product>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    #[error("catalog service unreachable: {0}")]
    Transport(String),

    #[error("catalog service reported failure: {0}")]
    Rejected(String),
}

/// Collaborator that produces the set of currently sellable products.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_active(&self) -> Result<Vec<Product>, SourceError>;
}

/// HTTP implementation talking to the real product repository.
pub struct HttpProductSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpProductSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_active(&self) -> Result<Vec<Product>, SourceError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let envelope: CatalogEnvelope = response
            .json()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        if envelope.success {
            Ok(envelope.data.unwrap_or_default())
        } else {
            Err(SourceError::Rejected(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}
