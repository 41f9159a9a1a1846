//! Product repository for database operations.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use polostore_core::ProductId;

use super::{Page, RepositoryError, SortSpec};
use crate::models::Product;

/// Sortable columns for product listings.
pub const SORTABLE_FIELDS: &[&str] = &["created_at", "name", "price", "stock_quantity"];

const SELECT_COLUMNS: &str = "SELECT id, name, description, price, sale_price, image_url, \
     category, color, size, stock_quantity, is_featured, created_at FROM products";

/// Fields for inserting a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub image_url: Option<String>,
    pub category: String,
    pub color: String,
    pub size: String,
    pub stock_quantity: i64,
    pub is_featured: bool,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub sale_price: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub stock_quantity: Option<i64>,
    pub is_featured: Option<bool>,
}

/// Filters for product listings.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    /// Substring match on the product name.
    pub search: Option<String>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(product)
    }

    /// List products with filtering, sorting, and pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        sort: SortSpec,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_COLUMNS);
        qb.push(" WHERE 1=1");

        if let Some(category) = &filter.category {
            qb.push(" AND category = ").push_bind(category);
        }
        if let Some(featured) = filter.is_featured {
            qb.push(" AND is_featured = ").push_bind(featured);
        }
        if let Some(search) = &filter.search {
            qb.push(" AND name LIKE ").push_bind(format!("%{search}%"));
        }

        qb.push(" ORDER BY ").push(sort.sql());
        qb.push(" LIMIT ").push_bind(page.limit);
        qb.push(" OFFSET ").push_bind(page.offset);

        let products = qb.build_query_as::<Product>().fetch_all(self.pool).await?;

        Ok(products)
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products
                (name, description, price, sale_price, image_url, category,
                 color, size, stock_quantity, is_featured, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, description, price, sale_price, image_url,
                      category, color, size, stock_quantity, is_featured, created_at
            ",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.sale_price)
        .bind(&new.image_url)
        .bind(&new.category)
        .bind(&new.color)
        .bind(&new.size)
        .bind(new.stock_quantity)
        .bind(new.is_featured)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Apply a partial update; absent fields keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            UPDATE products SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                price = COALESCE(?, price),
                sale_price = COALESCE(?, sale_price),
                image_url = COALESCE(?, image_url),
                category = COALESCE(?, category),
                color = COALESCE(?, color),
                size = COALESCE(?, size),
                stock_quantity = COALESCE(?, stock_quantity),
                is_featured = COALESCE(?, is_featured)
            WHERE id = ?
            RETURNING id, name, description, price, sale_price, image_url,
                      category, color, size, stock_quantity, is_featured, created_at
            ",
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price)
        .bind(update.sale_price)
        .bind(&update.image_url)
        .bind(&update.category)
        .bind(&update.color)
        .bind(&update.size)
        .bind(update.stock_quantity)
        .bind(update.is_featured)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(product)
    }

    /// Delete a product by ID.
    ///
    /// Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
