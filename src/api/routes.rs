//! Axum router and all HTTP handlers.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers, so tests can drive the bare router.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use tracing::info;

use crate::api::{api_types::HealthResponse, error::ApiError, state::AppState};
use crate::domain::{Order, OrderCreate, Product};
use crate::error::OrderError;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/orders", post(create_order))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/cancel", put(cancel_order))
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service.to_string(),
            version: st.build.version.to_string(),
        }),
    )
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

pub(crate) async fn create_order(
    State(st): State<Arc<AppState>>,
    payload: Result<Json<OrderCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let Json(req) = payload?;
    let order = st.store.create_order(req.customer_id, req.items).await?;
    info!(order_id = %order.id, total = %order.total, "orders/create");
    Ok((StatusCode::CREATED, Json(order)))
}

pub(crate) async fn get_order(
    State(st): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(st.store.get_order(id).await?))
}

pub(crate) async fn cancel_order(
    State(st): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order = st.store.cancel_order(id).await?;
    info!(order_id = %order.id, "orders/cancel");
    Ok(Json(order))
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

pub(crate) async fn list_products(
    State(st): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(st.store.list_products().await?))
}

pub(crate) async fn get_product(
    State(st): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    match st.store.get_product(id).await {
        Ok(product) => Ok(Json(product)),
        Err(OrderError::ProductNotFound(id)) => {
            Err(ApiError::NotFound(format!("product not found: {id}")))
        }
        Err(e) => Err(e.into()),
    }
}
