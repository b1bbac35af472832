use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cart::store::CartError;
use crate::checkout::orchestrator::CheckoutError;

/// Service-level errors, mapped onto HTTP responses.
///
/// "Catalog is still loading" and "catalog failed to load" are deliberately
/// distinct from an empty product list: the first two are errors, the last
/// is a successful empty response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("catalog is still loading")]
    CatalogPending,

    #[error("couldn't load products: {0}")]
    CatalogUnavailable(String),

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("product is out of stock: {0}")]
    OutOfStock(String),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::CatalogPending => StatusCode::SERVICE_UNAVAILABLE,
            AppError::CatalogUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::UnknownProduct(_) => StatusCode::NOT_FOUND,
            AppError::OutOfStock(_) => StatusCode::CONFLICT,
            AppError::Cart(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Checkout(CheckoutError::EmptyCart) => StatusCode::CONFLICT,
            AppError::Checkout(CheckoutError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Checkout(CheckoutError::SubmissionInFlight) => StatusCode::CONFLICT,
            AppError::Checkout(CheckoutError::Gateway(_)) => StatusCode::BAD_GATEWAY,
        };

        // Same envelope shape the collaborators use.
        (status, Json(json!({ "success": false, "error": self.to_string() }))).into_response()
    }
}
