//! Order route handlers.
//!
//! Orders are normally created through `POST /checkout`; the POST handler
//! here is the administrative path that writes an order without touching a
//! cart. PUT only changes status, and only along the allowed transitions.

use axum::{Json, extract::Query, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use polostore_core::{OrderId, OrderStatus};

use crate::db::orders::{NewOrder, OrderFilter, OrderRepository};
use crate::db::{Page, SortSpec};
use crate::error::{AppError, Result};
use crate::models::Order;
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct OrderQuery {
    pub id: Option<OrderId>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    pub total_amount: f64,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub status: String,
}

fn parse_status(raw: &str) -> Result<OrderStatus> {
    raw.parse()
        .map_err(|e: String| AppError::validation("INVALID_STATUS", e))
}

/// `GET /orders` — one order with `?id=`, otherwise a filtered list.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Value>> {
    let repo = OrderRepository::new(state.pool());

    if let Some(id) = query.id {
        let order = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order".to_string()))?;
        return Ok(Json(json!(order)));
    }

    let sort = SortSpec::parse(
        query.sort.as_deref(),
        query.order.as_deref(),
        crate::db::orders::SORTABLE_FIELDS,
        "created_at",
    )
    .map_err(|e| AppError::validation("INVALID_SORT_FIELD", e.to_string()))?;

    let status = query.status.as_deref().map(parse_status).transpose()?;
    let filter = OrderFilter {
        status,
        search: query.search,
    };
    let page = Page::clamped(query.limit, query.offset);

    let orders = repo.list(&filter, sort, page).await?;

    Ok(Json(json!(orders)))
}

/// `POST /orders`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    if body.customer_name.trim().is_empty() {
        return Err(AppError::validation(
            "MISSING_REQUIRED_FIELD",
            "customerName is required",
        ));
    }
    if !body.total_amount.is_finite() || body.total_amount <= 0.0 {
        return Err(AppError::validation(
            "INVALID_TOTAL",
            "Total amount must be positive",
        ));
    }

    let status = body
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?
        .unwrap_or_default();

    let repo = OrderRepository::new(state.pool());
    let order = repo
        .create(&NewOrder {
            customer_name: body.customer_name,
            customer_email: body.customer_email,
            customer_phone: body.customer_phone,
            shipping_address: body.shipping_address,
            total_amount: body.total_amount,
            status,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// `PUT /orders?id=` — status change along the allowed transitions only.
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
    Json(body): Json<UpdateOrderRequest>,
) -> Result<Json<Order>> {
    let id = query
        .id
        .ok_or_else(|| AppError::validation("MISSING_ID", "Order id is required"))?;

    let next = parse_status(&body.status)?;

    let repo = OrderRepository::new(state.pool());
    let current = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

    if !current.status.can_transition_to(next) {
        return Err(AppError::validation(
            "INVALID_STATUS_TRANSITION",
            format!("Cannot move order from {} to {next}", current.status),
        ));
    }

    let order = repo.update_status(id, next).await?;

    Ok(Json(order))
}

/// `DELETE /orders?id=`
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Value>> {
    let id = query
        .id
        .ok_or_else(|| AppError::validation("MISSING_ID", "Order id is required"))?;

    let repo = OrderRepository::new(state.pool());
    if !repo.delete(id).await? {
        return Err(AppError::NotFound("Order".to_string()));
    }

    Ok(Json(json!({ "message": "Order deleted" })))
}
