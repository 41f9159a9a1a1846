//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (DB ping)
//!
//! # Auth
//! POST /auth/register          - Create an account (201)
//! POST /auth/login             - Issue a bearer session
//! POST /auth/logout            - Delete the caller's session
//! GET  /auth/me                - Inspect the caller's session
//! POST /auth/forgot-password   - Mint a one-time reset token
//! POST /auth/reset-password    - Consume a reset token
//!
//! # Catalog / cart / orders
//! GET|POST|PUT|DELETE /products     - Product CRUD (`?id=` selects one)
//! GET|POST|PUT|DELETE /categories   - Category CRUD
//! GET|POST|PUT|DELETE /cart-items   - Cart line CRUD (`?sessionId=` lists a cart)
//! GET|POST|PUT|DELETE /orders       - Order CRUD (PUT changes status)
//! GET|POST|PUT|DELETE /order-items  - Order line CRUD (`?orderId=` lists)
//!
//! # Checkout
//! POST /checkout               - Convert a cart into an order (201)
//! ```
//!
//! List endpoints take `limit` (capped at 100), `offset`, and where noted
//! `search`, `sort`, `order` with a per-entity allow-list of sort fields.

pub mod auth;
pub mod cart_items;
pub mod categories;
pub mod checkout;
pub mod order_items;
pub mod orders;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(health_ready))
        .nest("/auth", auth::router())
        .route(
            "/products",
            get(products::index)
                .post(products::create)
                .put(products::update)
                .delete(products::delete),
        )
        .route(
            "/categories",
            get(categories::index)
                .post(categories::create)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route(
            "/cart-items",
            get(cart_items::index)
                .post(cart_items::create)
                .put(cart_items::update)
                .delete(cart_items::delete),
        )
        .route(
            "/orders",
            get(orders::index)
                .post(orders::create)
                .put(orders::update)
                .delete(orders::delete),
        )
        .route(
            "/order-items",
            get(order_items::index)
                .post(order_items::create)
                .put(order_items::update)
                .delete(order_items::delete),
        )
        .route("/checkout", post(checkout::place_order))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness check.
async fn health() -> &'static str {
    "OK"
}

/// Readiness check: verifies the database answers.
async fn health_ready(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(state.pool())
        .await
        .map_err(|error| {
            tracing::error!(%error, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    Ok("READY")
}
