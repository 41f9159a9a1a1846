//! Category route handlers.

use axum::{Json, extract::Query, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use polostore_core::CategoryId;

use crate::db::CategoryRepository;
use crate::error::{AppError, Result};
use crate::models::Category;
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct CategoryQuery {
    pub id: Option<CategoryId>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// `GET /categories` — one category with `?id=`, otherwise all of them.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Value>> {
    let repo = CategoryRepository::new(state.pool());

    if let Some(id) = query.id {
        let category = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category".to_string()))?;
        return Ok(Json(json!(category)));
    }

    let categories = repo.list().await?;

    Ok(Json(json!(categories)))
}

/// `POST /categories`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::validation("MISSING_NAME", "Name is required"));
    }

    let repo = CategoryRepository::new(state.pool());
    let category = repo
        .create(body.name.trim(), body.description.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /categories?id=`
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
    Json(body): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>> {
    let id = query
        .id
        .ok_or_else(|| AppError::validation("MISSING_ID", "Category id is required"))?;

    let repo = CategoryRepository::new(state.pool());
    let category = repo
        .update(id, body.name.as_deref(), body.description.as_deref())
        .await?;

    Ok(Json(category))
}

/// `DELETE /categories?id=`
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Value>> {
    let id = query
        .id
        .ok_or_else(|| AppError::validation("MISSING_ID", "Category id is required"))?;

    let repo = CategoryRepository::new(state.pool());
    if !repo.delete(id).await? {
        return Err(AppError::NotFound("Category".to_string()));
    }

    Ok(Json(json!({ "message": "Category deleted" })))
}
