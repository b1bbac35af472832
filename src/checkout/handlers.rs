//! REST API handlers for the checkout step.

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::models::CustomerInfo;
use crate::error::AppError;
use crate::session::{resolve_session_id, with_session_cookie};
use crate::state::SharedState;

/// Creates routes for checkout-related operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/checkout", get(review).post(submit))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewResponse {
    total: f64,
}

/// Endpoint: GET /checkout
/// Enters the review step; requires a non-empty cart and reports the
/// read-only rounded total.
async fn review(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (session_id, is_new) = resolve_session_id(&headers);
    let session = state.session(&session_id);

    let total = {
        let cart = session.cart.lock().expect("cart lock poisoned");
        session.checkout.begin(&cart)?
    };

    let response = Json(ReviewResponse { total }).into_response();
    Ok(with_session_cookie(response, &session_id, is_new))
}

/// Endpoint: POST /checkout
/// Validates the customer fields and submits the cart to the payment
/// gateway. On success the caller must navigate to `data.paymentLink`
/// exactly as returned.
async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(customer): Json<CustomerInfo>,
) -> Result<Response, AppError> {
    let (session_id, is_new) = resolve_session_id(&headers);
    let session = state.session(&session_id);

    let payment_link = session
        .checkout
        .submit(&session.cart, &customer, state.gateway.as_ref())
        .await?;

    let response = Json(json!({
        "success": true,
        "data": { "paymentLink": payment_link }
    }))
    .into_response();
    Ok(with_session_cookie(response, &session_id, is_new))
}
