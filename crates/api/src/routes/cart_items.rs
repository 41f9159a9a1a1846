//! Cart item route handlers.
//!
//! Carts are keyed by a client-generated `sessionId` string; no
//! authentication is required, matching the anonymous-shopper flow.

use axum::{Json, extract::Query, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use polostore_core::{CartItemId, ProductId};

use crate::db::CartItemRepository;
use crate::error::{AppError, Result};
use crate::models::CartItem;
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartItemQuery {
    pub id: Option<CartItemId>,
    pub session_id: Option<String>,
    pub product_id: Option<ProductId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartItemRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub size: String,
    pub color: String,
    pub session_id: String,
}

const fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateCartItemRequest {
    pub quantity: Option<i64>,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// `GET /cart-items` — one item with `?id=`, a cart with `?sessionId=`, or
/// every line referencing a product with `?productId=`.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CartItemQuery>,
) -> Result<Json<Value>> {
    let repo = CartItemRepository::new(state.pool());

    if let Some(id) = query.id {
        let item = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart item".to_string()))?;
        return Ok(Json(json!(item)));
    }

    if let Some(session_id) = &query.session_id {
        let items = repo.list_by_session(session_id).await?;
        return Ok(Json(json!(items)));
    }

    if let Some(product_id) = query.product_id {
        let items = repo.list_by_product(product_id).await?;
        return Ok(Json(json!(items)));
    }

    Err(AppError::validation(
        "MISSING_FILTER",
        "One of id, sessionId, or productId is required",
    ))
}

/// `POST /cart-items`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateCartItemRequest>,
) -> Result<(StatusCode, Json<CartItem>)> {
    if body.session_id.trim().is_empty() {
        return Err(AppError::validation(
            "MISSING_SESSION_ID",
            "sessionId is required",
        ));
    }
    if body.quantity <= 0 {
        return Err(AppError::validation(
            "INVALID_QUANTITY",
            "Quantity must be positive",
        ));
    }

    let repo = CartItemRepository::new(state.pool());
    let item = repo
        .create(
            body.product_id,
            body.quantity,
            &body.size,
            &body.color,
            &body.session_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /cart-items?id=`
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<CartItemQuery>,
    Json(body): Json<UpdateCartItemRequest>,
) -> Result<Json<CartItem>> {
    let id = query
        .id
        .ok_or_else(|| AppError::validation("MISSING_ID", "Cart item id is required"))?;

    if let Some(quantity) = body.quantity
        && quantity <= 0
    {
        return Err(AppError::validation(
            "INVALID_QUANTITY",
            "Quantity must be positive",
        ));
    }

    let repo = CartItemRepository::new(state.pool());
    let item = repo
        .update(id, body.quantity, body.size.as_deref(), body.color.as_deref())
        .await?;

    Ok(Json(item))
}

/// `DELETE /cart-items?id=`
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<CartItemQuery>,
) -> Result<Json<Value>> {
    let id = query
        .id
        .ok_or_else(|| AppError::validation("MISSING_ID", "Cart item id is required"))?;

    let repo = CartItemRepository::new(state.pool());
    if !repo.delete(id).await? {
        return Err(AppError::NotFound("Cart item".to_string()));
    }

    Ok(Json(json!({ "message": "Cart item removed" })))
}
