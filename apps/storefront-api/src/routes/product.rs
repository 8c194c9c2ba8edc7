//! # Product Routes
//!
//! ## Calculate Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /product/calculate { cart, memberNumber? }                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  body parse ───────── malformed JSON ──────────► 400 {error}           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart empty? ─────── yes ──────────────────────► 400 Cart cannot ...   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ids valid? ──────── no ───────────────────────► 400 Invalid productId │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog lookup ──── store down ───────────────► 500                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricingEngine::price ─────────────────────────► 200 totals            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use storefront_core::{CalculationResult, CartLine, Money, Product, ORDER_PLACED_MESSAGE};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/product", get(list_products))
        .route("/product/", get(list_products))
        .route("/product/calculate", post(calculate))
        .route("/product/place-order", post(place_order))
}

// =============================================================================
// Request / Response Bodies
// =============================================================================

/// Body of `POST /product/calculate`.
///
/// A cart that is missing, `null` or not an array is treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    #[serde(default)]
    pub cart: Option<Value>,
    #[serde(default)]
    pub member_number: Option<String>,
}

/// Body of `POST /product/place-order`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub cart: Option<Value>,
    #[serde(default)]
    pub member_number: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Money>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub message: String,
    pub order_id: String,
}

/// Reads the cart lines out of a raw `cart` value.
///
/// Anything other than an array yields no lines, so the empty-cart rules
/// answer for it. Array entries must still be well-formed lines.
fn cart_lines(cart: Option<Value>) -> Result<Vec<CartLine>, ApiError> {
    match cart {
        Some(lines @ Value::Array(_)) => serde_json::from_value(lines)
            .map_err(|e| ApiError::BadRequest(format!("Invalid cart: {e}"))),
        _ => Ok(Vec::new()),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Lists all products, with `itemLimit` where an availability policy applies.
async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.catalog.list_all().await?;
    let products = state.availability.annotate(products, Utc::now()).await?;

    debug!(count = products.len(), "Listing products");
    Ok(Json(products))
}

/// Prices a cart.
async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculationResult>, ApiError> {
    let Json(request) = payload?;
    let cart = cart_lines(request.cart)?;

    let result = state
        .pricing
        .calculate(&cart, request.member_number.as_deref())
        .await?;

    Ok(Json(result))
}

/// Stores a pending order.
async fn place_order(
    State(state): State<AppState>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), ApiError> {
    let Json(request) = payload?;
    let cart = cart_lines(request.cart)?;

    let order_id = state
        .orders
        .place(
            cart,
            request.member_number.as_deref(),
            request.total_amount,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            success: true,
            message: ORDER_PLACED_MESSAGE.to_string(),
            order_id: order_id.to_string(),
        }),
    ))
}
