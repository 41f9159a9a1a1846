//! Database operations for the storefront `SQLite` store.
//!
//! ## Tables
//!
//! - `users` - Credential store (email, password hash, role)
//! - `sessions` - Bearer tokens and one-time password-reset tokens
//! - `products` / `categories` - Catalog
//! - `cart_items` - Anonymous cart line items
//! - `orders` / `order_items` - Finalized orders with price snapshots
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and run automatically at
//! startup via `sqlx::migrate!`.

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub mod cart_items;
pub mod categories;
pub mod orders;
pub mod products;
pub mod sessions;
pub mod users;

pub use cart_items::CartItemRepository;
pub use categories::CategoryRepository;
pub use orders::{OrderItemRepository, OrderRepository};
pub use products::ProductRepository;
pub use sessions::SessionRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing; foreign keys are enforced.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Maximum page size accepted by list endpoints.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default page size when the client does not pass `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A clamped limit/offset pair for list queries.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Build a page from raw query parameters, clamping the limit to
    /// [`MAX_PAGE_SIZE`] and rejecting negative values by falling back to
    /// the defaults.
    #[must_use]
    pub fn clamped(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let offset = offset.filter(|o| *o >= 0).unwrap_or(0);
        Self { limit, offset }
    }
}

/// The requested sort field is not in the endpoint's allow-list.
#[derive(Debug, Error)]
#[error("unsortable field: {field}")]
pub struct InvalidSortField {
    pub field: String,
}

/// A validated ORDER BY clause.
///
/// Sort columns are interpolated into SQL, so they must come from the
/// per-endpoint allow-list; everything else is rejected before the query
/// is built.
#[derive(Debug, Clone, Copy)]
pub struct SortSpec {
    column: &'static str,
    descending: bool,
}

impl SortSpec {
    /// Validate a requested sort field against an allow-list.
    ///
    /// `order` accepts `asc`; anything else sorts descending, which is the
    /// default for every list endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSortField`] if `sort` names a column outside the
    /// allow-list.
    pub fn parse(
        sort: Option<&str>,
        order: Option<&str>,
        allowed: &'static [&'static str],
        default: &'static str,
    ) -> Result<Self, InvalidSortField> {
        let column = match sort {
            None => default,
            Some(requested) => allowed
                .iter()
                .find(|c| **c == requested)
                .copied()
                .ok_or_else(|| InvalidSortField {
                    field: requested.to_string(),
                })?,
        };

        Ok(Self {
            column,
            descending: order != Some("asc"),
        })
    }

    /// Render the clause body, e.g. `created_at DESC`.
    #[must_use]
    pub fn sql(&self) -> String {
        format!(
            "{} {}",
            self.column,
            if self.descending { "DESC" } else { "ASC" }
        )
    }
}
