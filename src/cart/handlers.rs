//! REST API handlers for cart operations.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::models::round_to_cents;
use crate::catalog::loader::CatalogState;
use crate::error::AppError;
use crate::session::{resolve_session_id, with_session_cookie};
use crate::state::{SharedState, ShopSession};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:product_id", patch(update_item).delete(remove_item))
}

/// Returns the default quantity (1) for added items
fn default_quantity() -> u32 {
    1
}

/// Input for adding a product to the cart
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemInput {
    product_id: String,

    #[serde(default = "default_quantity")]
    quantity: u32,
}

/// Input for replacing a line's quantity. Zero or negative removes the line.
#[derive(Debug, Deserialize)]
struct UpdateQuantityInput {
    quantity: i64,
}

/// One rendered cart line, with display-rounded amounts.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartLine {
    product_id: String,
    name: String,
    quantity: u32,
    unit_price: f64,
    line_total: f64,
}

/// The rendered cart: lines, rounded total, and the transient
/// "just added" markers.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView {
    items: Vec<CartLine>,
    total: f64,
    recently_added: Vec<String>,
}

fn cart_view(session: &ShopSession) -> CartView {
    let cart = session.cart.lock().expect("cart lock poisoned");
    CartView {
        items: cart
            .items()
            .iter()
            .map(|i| CartLine {
                product_id: i.product_id.clone(),
                name: i.product.name.clone(),
                quantity: i.quantity,
                unit_price: i.product.price,
                line_total: round_to_cents(i.line_total()),
            })
            .collect(),
        total: cart.display_total(),
        recently_added: session.feedback.recent_ids(),
    }
}

/// Endpoint: GET /cart
async fn get_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let session = state.session(&session_id);

    let response = Json(cart_view(&session)).into_response();
    with_session_cookie(response, &session_id, is_new)
}

/// Endpoint: POST /cart/items
///
/// Looks the product up in the loaded catalog and snapshots it into the
/// cart. The out-of-stock gate lives here, not in the store; this is the
/// service-side stand-in for the disabled add control.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemInput>,
) -> Result<Response, AppError> {
    let (session_id, is_new) = resolve_session_id(&headers);
    let session = state.session(&session_id);

    let product = match state.catalog.snapshot() {
        CatalogState::Loading => return Err(AppError::CatalogPending),
        CatalogState::Failed(reason) => return Err(AppError::CatalogUnavailable(reason)),
        CatalogState::Ready(_) => state
            .catalog
            .find(&payload.product_id)
            .ok_or_else(|| AppError::UnknownProduct(payload.product_id.clone()))?,
    };

    if !product.in_stock {
        return Err(AppError::OutOfStock(product.id));
    }

    session
        .cart
        .lock()
        .expect("cart lock poisoned")
        .add(&product, payload.quantity)?;
    session.feedback.mark_added(&product.id);

    let response = Json(cart_view(&session)).into_response();
    Ok(with_session_cookie(response, &session_id, is_new))
}

/// Endpoint: PATCH /cart/items/{product_id}
async fn update_item(
    State(state): State<SharedState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UpdateQuantityInput>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let session = state.session(&session_id);

    session
        .cart
        .lock()
        .expect("cart lock poisoned")
        .update_quantity(&product_id, payload.quantity);

    let response = Json(cart_view(&session)).into_response();
    with_session_cookie(response, &session_id, is_new)
}

/// Endpoint: DELETE /cart/items/{product_id}
///
/// Idempotent; removing an absent line is not an error. Any pending "just
/// added" marker for the line is canceled along with it.
async fn remove_item(
    State(state): State<SharedState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let session = state.session(&session_id);

    session
        .cart
        .lock()
        .expect("cart lock poisoned")
        .remove(&product_id);
    session.feedback.cancel(&product_id);

    let response = Json(cart_view(&session)).into_response();
    with_session_cookie(response, &session_id, is_new)
}
