//! Order and order item repositories.
//!
//! Plain CRUD only. The multi-step cart-to-order conversion lives in
//! [`crate::services::checkout`], which runs inside a single transaction.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use polostore_core::{OrderId, OrderItemId, OrderStatus, ProductId};

use super::{Page, RepositoryError, SortSpec};
use crate::models::{Order, OrderItem};

/// Sortable columns for order listings.
pub const SORTABLE_FIELDS: &[&str] = &["created_at", "total_amount", "customer_name", "status"];

const ORDER_COLUMNS: &str = "SELECT id, customer_name, customer_email, customer_phone, \
     shipping_address, total_amount, status, created_at FROM orders";

const ITEM_COLUMNS: &str =
    "SELECT id, order_id, product_id, quantity, price, size, color FROM order_items";

/// Fields for inserting a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    pub total_amount: f64,
    pub status: OrderStatus,
}

/// Filters for order listings.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Substring match on the customer name.
    pub search: Option<String>,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!("{ORDER_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(order)
    }

    /// List orders with filtering, sorting, and pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &OrderFilter,
        sort: SortSpec,
        page: Page,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(ORDER_COLUMNS);
        qb.push(" WHERE 1=1");

        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(search) = &filter.search {
            qb.push(" AND customer_name LIKE ").push_bind(format!("%{search}%"));
        }

        qb.push(" ORDER BY ").push(sort.sql());
        qb.push(" LIMIT ").push_bind(page.limit);
        qb.push(" OFFSET ").push_bind(page.offset);

        let orders = qb.build_query_as::<Order>().fetch_all(self.pool).await?;

        Ok(orders)
    }

    /// Insert a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
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
        .bind(&new.customer_name)
        .bind(&new.customer_email)
        .bind(&new.customer_phone)
        .bind(&new.shipping_address)
        .bind(new.total_amount)
        .bind(new.status)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(order)
    }

    /// Update an order's status.
    ///
    /// Transition rules are enforced by the caller against
    /// [`OrderStatus::can_transition_to`] before this runs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            UPDATE orders SET status = ?
            WHERE id = ?
            RETURNING id, customer_name, customer_email, customer_phone,
                      shipping_address, total_amount, status, created_at
            ",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(order)
    }

    /// Delete an order by ID.
    ///
    /// Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Repository for order item database operations.
pub struct OrderItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderItemRepository<'a> {
    /// Create a new order item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an order item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderItemId) -> Result<Option<OrderItem>, RepositoryError> {
        let item = sqlx::query_as::<_, OrderItem>(&format!("{ITEM_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(item)
    }

    /// List the line items of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_order(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(&format!("{ITEM_COLUMNS} WHERE order_id = ?"))
            .bind(order_id)
            .fetch_all(self.pool)
            .await?;

        Ok(items)
    }

    /// Insert a single order item (administrative correction path; checkout
    /// writes items inside its own transaction).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        order_id: OrderId,
        product_id: ProductId,
        quantity: i64,
        price: f64,
        size: &str,
        color: &str,
    ) -> Result<OrderItem, RepositoryError> {
        let item = sqlx::query_as::<_, OrderItem>(
            r"
            INSERT INTO order_items (order_id, product_id, quantity, price, size, color)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, order_id, product_id, quantity, price, size, color
            ",
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(price)
        .bind(size)
        .bind(color)
        .fetch_one(self.pool)
        .await?;

        Ok(item)
    }

    /// Update an order item (administrative correction).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: OrderItemId,
        quantity: Option<i64>,
        price: Option<f64>,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<OrderItem, RepositoryError> {
        let item = sqlx::query_as::<_, OrderItem>(
            r"
            UPDATE order_items SET
                quantity = COALESCE(?, quantity),
                price = COALESCE(?, price),
                size = COALESCE(?, size),
                color = COALESCE(?, color)
            WHERE id = ?
            RETURNING id, order_id, product_id, quantity, price, size, color
            ",
        )
        .bind(quantity)
        .bind(price)
        .bind(size)
        .bind(color)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(item)
    }

    /// Delete an order item by ID.
    ///
    /// Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: OrderItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM order_items WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
