//! Product route handlers.

use axum::{Json, extract::Query, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use polostore_core::ProductId;

use crate::db::products::{NewProduct, ProductFilter, ProductRepository, ProductUpdate};
use crate::db::{Page, SortSpec};
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub id: Option<ProductId>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub sale_price: Option<f64>,
    pub image_url: Option<String>,
    pub category: String,
    pub color: String,
    pub size: String,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
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

/// `GET /products` — one product with `?id=`, otherwise a filtered list.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Value>> {
    let repo = ProductRepository::new(state.pool());

    if let Some(id) = query.id {
        let product = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
        return Ok(Json(json!(product)));
    }

    let sort = SortSpec::parse(
        query.sort.as_deref(),
        query.order.as_deref(),
        crate::db::products::SORTABLE_FIELDS,
        "created_at",
    )
    .map_err(|e| AppError::validation("INVALID_SORT_FIELD", e.to_string()))?;

    let filter = ProductFilter {
        category: query.category,
        is_featured: query.is_featured,
        search: query.search,
    };
    let page = Page::clamped(query.limit, query.offset);

    let products = repo.list(&filter, sort, page).await?;

    Ok(Json(json!(products)))
}

/// `POST /products`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::validation("MISSING_NAME", "Name is required"));
    }
    if !body.price.is_finite() || body.price < 0.0 {
        return Err(AppError::validation(
            "INVALID_PRICE",
            "Price must be a non-negative number",
        ));
    }

    let repo = ProductRepository::new(state.pool());
    let product = repo
        .create(&NewProduct {
            name: body.name,
            description: body.description,
            price: body.price,
            sale_price: body.sale_price,
            image_url: body.image_url,
            category: body.category,
            color: body.color,
            size: body.size,
            stock_quantity: body.stock_quantity,
            is_featured: body.is_featured,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products?id=`
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    let id = query
        .id
        .ok_or_else(|| AppError::validation("MISSING_ID", "Product id is required"))?;

    if let Some(price) = body.price
        && (!price.is_finite() || price < 0.0)
    {
        return Err(AppError::validation(
            "INVALID_PRICE",
            "Price must be a non-negative number",
        ));
    }

    let repo = ProductRepository::new(state.pool());
    let product = repo
        .update(
            id,
            &ProductUpdate {
                name: body.name,
                description: body.description,
                price: body.price,
                sale_price: body.sale_price,
                image_url: body.image_url,
                category: body.category,
                color: body.color,
                size: body.size,
                stock_quantity: body.stock_quantity,
                is_featured: body.is_featured,
            },
        )
        .await?;

    Ok(Json(product))
}

/// `DELETE /products?id=`
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Value>> {
    let id = query
        .id
        .ok_or_else(|| AppError::validation("MISSING_ID", "Product id is required"))?;

    let repo = ProductRepository::new(state.pool());
    if !repo.delete(id).await? {
        return Err(AppError::NotFound("Product".to_string()));
    }

    Ok(Json(json!({ "message": "Product deleted" })))
}
