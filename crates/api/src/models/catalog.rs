//! Catalog domain types: products and categories.

use chrono::{DateTime, Utc};
use serde::Serialize;

use polostore_core::{CategoryId, ProductId};

/// A catalog product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    /// Regular unit price.
    pub price: f64,
    /// Discounted price, when on sale.
    pub sale_price: Option<f64>,
    pub image_url: Option<String>,
    pub category: String,
    pub color: String,
    pub size: String,
    pub stock_quantity: i64,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The price a buyer pays right now: the sale price when set, otherwise
    /// the regular price. This is the value snapshotted into order items.
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        self.sale_price.unwrap_or(self.price)
    }
}

/// A product category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    pub name: String,
    /// URL-safe identifier derived from the name (unique).
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, sale_price: Option<f64>) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Classic Polo".to_string(),
            description: None,
            price,
            sale_price,
            image_url: None,
            category: "polos".to_string(),
            color: "navy".to_string(),
            size: "M".to_string(),
            stock_quantity: 10,
            is_featured: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_price_prefers_sale_price() {
        assert!((product(49.99, Some(39.99)).effective_price() - 39.99).abs() < f64::EPSILON);
        assert!((product(49.99, None).effective_price() - 49.99).abs() < f64::EPSILON);
    }
}
