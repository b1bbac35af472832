//! REST API handlers for catalog browsing.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::filter::filter_and_sort;
use super::loader::CatalogState;
use super::models::{CategoryFilter, Product, SortMode};
use crate::error::AppError;
use crate::state::SharedState;

/// Creates routes for catalog-related operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/products", get(list_products))
}

#[derive(Debug, Default, Deserialize)]
struct ProductsQuery {
    #[serde(default)]
    category: CategoryFilter,
    #[serde(default)]
    sort: SortMode,
}

/// Endpoint: GET /products?category=&sort=
///
/// A still-loading catalog answers 503 and a failed load answers 502, so an
/// empty 200 list always means a genuinely empty catalog.
async fn list_products(
    State(state): State<SharedState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    match state.catalog.snapshot() {
        CatalogState::Loading => Err(AppError::CatalogPending),
        CatalogState::Failed(reason) => Err(AppError::CatalogUnavailable(reason)),
        CatalogState::Ready(products) => {
            Ok(Json(filter_and_sort(&products, query.category, query.sort)))
        }
    }
}
