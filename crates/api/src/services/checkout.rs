//! Checkout orchestrator.
//!
//! Converts an anonymous cart into a finalized order. This is the only
//! multi-step, multi-entity write in the system, so the whole sequence runs
//! inside one database transaction: order insert, order-item inserts with
//! price snapshots, and cart clearing either all land or none do. A crash
//! mid-checkout leaves the cart intact for resubmission rather than a
//! half-written order.

use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;

use polostore_core::{Email, EmailError, OrderStatus, ProductId};

use crate::db::RepositoryError;
use crate::models::{CartItem, Order, OrderItem, Product};

/// Customer-submitted checkout payload, already shape-validated by the route.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    /// The anonymous cart session to convert.
    pub session_id: String,
    /// Total the client computed (items plus shipping).
    pub total_amount: f64,
}

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required contact/address field is missing or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Customer email is malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Submitted total is not a positive number.
    #[error("total amount must be positive")]
    InvalidTotal,

    /// The cart session has no line items.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart line references a product that no longer exists.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Checkout orchestrator service.
pub struct CheckoutService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an order from the cart identified by `request.session_id`.
    ///
    /// Validation happens strictly before any write: required fields, email
    /// format, positive total, non-empty cart, and existence of every
    /// referenced product. The writes then run in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] describing the first validation failure,
    /// or `CheckoutError::Repository` if the transaction fails. In every
    /// error case no store is mutated.
    pub async fn place_order(
        &self,
        request: &CheckoutRequest,
    ) -> Result<(Order, Vec<OrderItem>), CheckoutError> {
        validate_request(request)?;

        let mut tx = self.pool.begin().await?;

        // Read the cart inside the transaction so a concurrent checkout of
        // the same session cannot double-spend the same line items.
        let cart_items = sqlx::query_as::<_, CartItem>(
            r"
            SELECT id, product_id, quantity, size, color, session_id, created_at
            FROM cart_items
            WHERE session_id = ?
            ORDER BY created_at
            ",
        )
        .bind(&request.session_id)
        .fetch_all(&mut *tx)
        .await?;

        if cart_items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // Validate every referenced product before the first write.
        let mut products = Vec::with_capacity(cart_items.len());
        for item in &cart_items {
            let product = sqlx::query_as::<_, Product>(
                r"
                SELECT id, name, description, price, sale_price, image_url,
                       category, color, size, stock_quantity, is_featured, created_at
                FROM products
                WHERE id = ?
                ",
            )
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CheckoutError::ProductNotFound(item.product_id))?;

            products.push(product);
        }

        let order = insert_order(&mut tx, request).await?;

        let mut order_items = Vec::with_capacity(cart_items.len());
        for (item, product) in cart_items.iter().zip(&products) {
            // Snapshot the current price; later catalog edits must not
            // rewrite history.
            let order_item = sqlx::query_as::<_, OrderItem>(
                r"
                INSERT INTO order_items (order_id, product_id, quantity, price, size, color)
                VALUES (?, ?, ?, ?, ?, ?)
                RETURNING id, order_id, product_id, quantity, price, size, color
                ",
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(product.effective_price())
            .bind(&item.size)
            .bind(&item.color)
            .fetch_one(&mut *tx)
            .await?;

            order_items.push(order_item);
        }

        sqlx::query("DELETE FROM cart_items WHERE session_id = ?")
            .bind(&request.session_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            order_id = %order.id,
            items = order_items.len(),
            "order placed"
        );

        Ok((order, order_items))
    }
}

/// Fail-fast field validation, in the order the fields appear on the form.
fn validate_request(request: &CheckoutRequest) -> Result<(), CheckoutError> {
    let required: [(&'static str, &str); 5] = [
        ("customerName", &request.customer_name),
        ("customerEmail", &request.customer_email),
        ("customerPhone", &request.customer_phone),
        ("shippingAddress", &request.shipping_address),
        ("sessionId", &request.session_id),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CheckoutError::MissingField(field));
        }
    }

    Email::parse(&request.customer_email)?;

    if !request.total_amount.is_finite() || request.total_amount <= 0.0 {
        return Err(CheckoutError::InvalidTotal);
    }

    Ok(())
}

async fn insert_order(
    tx: &mut Transaction<'_, Sqlite>,
    request: &CheckoutRequest,
) -> Result<Order, CheckoutError> {
    let order = sqlx::query_as::<_, Order>(
        r"
        INSERT INTO orders
            (customer_name, customer_email, customer_phone, shipping_address,
             total_amount, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, customer_name, customer_email, customer_phone,
                  shipping_address, total_amount, status, created_at
        ",
    )
    .bind(&request.customer_name)
    .bind(&request.customer_email)
    .bind(&request.customer_phone)
    .bind(&request.shipping_address)
    .bind(request.total_amount)
    .bind(OrderStatus::Pending)
    .bind(chrono::Utc::now())
    .fetch_one(&mut **tx)
    .await?;

    Ok(order)
}
