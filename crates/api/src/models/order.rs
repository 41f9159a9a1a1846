//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use polostore_core::{OrderId, OrderItemId, OrderStatus, ProductId};

/// A finalized order.
///
/// Orders belong permanently to the historical record, independent of
/// whether the originating cart session or user still exists.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    /// Flattened shipping address.
    pub shipping_address: String,
    /// Total submitted at checkout (items plus shipping).
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// A line item on a finalized order.
///
/// `price` is the unit price snapshotted at purchase time; later changes to
/// the live product price do not affect it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Unique order item ID.
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit price at time of purchase.
    pub price: f64,
    pub size: String,
    pub color: String,
}
