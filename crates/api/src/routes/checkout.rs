//! Checkout route handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Order, OrderItem};
use crate::services::{CheckoutRequest, CheckoutService};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub total_amount: f64,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// `POST /checkout` — convert the cart session into an order.
///
/// Fields default to empty so that a missing field surfaces as the
/// service's `MISSING_REQUIRED_FIELD` error rather than a deserialization
/// failure, keeping the error codes stable.
pub async fn place_order(
    State(state): State<AppState>,
    Json(body): Json<CheckoutBody>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let service = CheckoutService::new(state.pool());

    let (order, items) = service
        .place_order(&CheckoutRequest {
            customer_name: body.customer_name,
            customer_email: body.customer_email,
            customer_phone: body.customer_phone,
            shipping_address: body.shipping_address,
            session_id: body.session_id,
            total_amount: body.total_amount,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CheckoutResponse { order, items })))
}
