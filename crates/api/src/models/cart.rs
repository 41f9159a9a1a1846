//! Cart domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use polostore_core::{CartItemId, ProductId};

/// A line item in an anonymous shopper's cart.
///
/// `session_id` is a client-generated opaque string grouping the cart for
/// one browser; it is unrelated to the authenticated [`crate::models::Session`].
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique cart item ID.
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub size: String,
    pub color: String,
    /// Client-generated cart session identifier.
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}
