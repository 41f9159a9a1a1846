//! Order item route handlers.
//!
//! Administrative corrections on finalized order lines. Checkout writes the
//! canonical rows; these handlers exist for after-the-fact adjustments.

use axum::{Json, extract::Query, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use polostore_core::{OrderId, OrderItemId, ProductId};

use crate::db::OrderItemRepository;
use crate::error::{AppError, Result};
use crate::models::OrderItem;
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemQuery {
    pub id: Option<OrderItemId>,
    pub order_id: Option<OrderId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub price: f64,
    pub size: String,
    pub color: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateOrderItemRequest {
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// `GET /order-items` — one item with `?id=`, or an order's lines with
/// `?orderId=`.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrderItemQuery>,
) -> Result<Json<Value>> {
    let repo = OrderItemRepository::new(state.pool());

    if let Some(id) = query.id {
        let item = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order item".to_string()))?;
        return Ok(Json(json!(item)));
    }

    if let Some(order_id) = query.order_id {
        let items = repo.list_by_order(order_id).await?;
        return Ok(Json(json!(items)));
    }

    Err(AppError::validation(
        "MISSING_FILTER",
        "One of id or orderId is required",
    ))
}

/// `POST /order-items`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderItemRequest>,
) -> Result<(StatusCode, Json<OrderItem>)> {
    if body.quantity <= 0 {
        return Err(AppError::validation(
            "INVALID_QUANTITY",
            "Quantity must be positive",
        ));
    }
    if !body.price.is_finite() || body.price < 0.0 {
        return Err(AppError::validation(
            "INVALID_PRICE",
            "Price must be a non-negative number",
        ));
    }

    let repo = OrderItemRepository::new(state.pool());
    let item = repo
        .create(
            body.order_id,
            body.product_id,
            body.quantity,
            body.price,
            &body.size,
            &body.color,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /order-items?id=`
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<OrderItemQuery>,
    Json(body): Json<UpdateOrderItemRequest>,
) -> Result<Json<OrderItem>> {
    let id = query
        .id
        .ok_or_else(|| AppError::validation("MISSING_ID", "Order item id is required"))?;

    if let Some(quantity) = body.quantity
        && quantity <= 0
    {
        return Err(AppError::validation(
            "INVALID_QUANTITY",
            "Quantity must be positive",
        ));
    }

    let repo = OrderItemRepository::new(state.pool());
    let item = repo
        .update(
            id,
            body.quantity,
            body.price,
            body.size.as_deref(),
            body.color.as_deref(),
        )
        .await?;

    Ok(Json(item))
}

/// `DELETE /order-items?id=`
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<OrderItemQuery>,
) -> Result<Json<Value>> {
    let id = query
        .id
        .ok_or_else(|| AppError::validation("MISSING_ID", "Order item id is required"))?;

    let repo = OrderItemRepository::new(state.pool());
    if !repo.delete(id).await? {
        return Err(AppError::NotFound("Order item".to_string()));
    }

    Ok(Json(json!({ "message": "Order item deleted" })))
}
