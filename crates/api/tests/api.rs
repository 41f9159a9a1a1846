//! End-to-end API tests.
//!
//! Each test builds the full router over a fresh in-memory SQLite database
//! and drives it with `tower::ServiceExt::oneshot`, so the suite needs no
//! running server or external database.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use polostore_api::config::ApiConfig;
use polostore_api::db::SessionRepository;
use polostore_api::routes;
use polostore_api::state::AppState;
use polostore_core::{SessionPurpose, UserId};

/// Build the app over a fresh in-memory database.
///
/// `max_connections(1)` is load-bearing: every pooled connection to
/// `sqlite::memory:` would otherwise get its own empty database.
async fn setup() -> (Router, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!().run(&pool).await.unwrap();

    let config = ApiConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
    };

    (routes::app(AppState::new(config, pool.clone())), pool)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, None, Some(body)).await
}

async fn register(app: &Router, email: &str, password: &str, name: &str) -> (StatusCode, Value) {
    post(
        app,
        "/auth/register",
        json!({ "email": email, "password": password, "name": name }),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    post(
        app,
        "/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

async fn create_product(app: &Router, name: &str, price: f64, sale_price: Option<f64>) -> i64 {
    let (status, body) = post(
        app,
        "/products",
        json!({
            "name": name,
            "price": price,
            "salePrice": sale_price,
            "category": "polos",
            "color": "navy",
            "size": "M",
            "stockQuantity": 25,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn add_cart_item(app: &Router, product_id: i64, quantity: i64, session: &str) {
    let (status, _) = post(
        app,
        "/cart-items",
        json!({
            "productId": product_id,
            "quantity": quantity,
            "size": "M",
            "color": "navy",
            "sessionId": session,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

fn checkout_body(session: &str, total: f64) -> Value {
    json!({
        "customerName": "Alice",
        "customerEmail": "alice@example.com",
        "customerPhone": "+1 555 0100",
        "shippingAddress": "1 Main St, Springfield",
        "sessionId": session,
        "totalAmount": total,
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _pool) = setup().await;

    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Auth lifecycle
// ============================================================================

#[tokio::test]
async fn test_register_login_me_logout_flow() {
    let (app, _pool) = setup().await;

    let (status, user) = register(&app, "alice@example.com", "password123", "Alice").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], "alice@example.com");
    assert_eq!(user["name"], "Alice");
    assert_eq!(user["role"], "user");
    // The password must never appear in any response shape.
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());

    let (status, body) = login(&app, "alice@example.com", "password123").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    assert!(body["expiresAt"].is_string());

    let (status, me) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["user"]["email"], "alice@example.com");
    assert_eq!(me["user"]["id"], user["id"]);
    assert_eq!(me["session"]["purpose"], "login");

    let (status, _) = send(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() {
    let (app, _pool) = setup().await;

    let (status, _) = register(&app, "bob@example.com", "password123", "Bob").await;
    assert_eq!(status, StatusCode::CREATED);

    // Same address with different casing still collides.
    let (status, body) = register(&app, "BOB@Example.com", "password123", "Bob").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "EMAIL_EXISTS");
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let (app, _pool) = setup().await;

    let (status, body) = register(&app, "not-an-email", "password123", "X").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_EMAIL");

    let (status, body) = register(&app, "ok@example.com", "short", "X").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "WEAK_PASSWORD");

    let (status, body) = register(&app, "ok@example.com", "password123", "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_NAME");
}

#[tokio::test]
async fn test_auth_missing_body_fields_are_bad_requests() {
    let (app, _pool) = setup().await;

    // Absent fields must map to stable 400 codes, not a deserialization
    // rejection.
    let (status, body) = post(&app, "/auth/register", json!({ "email": "a@b.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_PASSWORD");

    let (status, body) = post(&app, "/auth/register", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_EMAIL");

    let (status, body) = post(&app, "/auth/login", json!({ "email": "a@b.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_PASSWORD");

    let (status, body) = post(&app, "/auth/forgot-password", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_EMAIL");

    let (status, body) = post(&app, "/auth/reset-password", json!({ "password": "longenough1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_RESET_TOKEN");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _pool) = setup().await;
    register(&app, "carol@example.com", "password123", "Carol").await;

    let (wrong_pw_status, wrong_pw) = login(&app, "carol@example.com", "wrong-password").await;
    let (no_user_status, no_user) = login(&app, "nobody@example.com", "password123").await;

    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_user_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw, no_user);
}

#[tokio::test]
async fn test_me_without_token_is_unauthorized() {
    let (app, _pool) = setup().await;

    let (status, body) = get(&app, "/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "MISSING_TOKEN");

    let (status, _) = send(&app, Method::GET, "/auth/me", Some("bogus-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected_idempotently() {
    let (app, pool) = setup().await;

    let (_, user) = register(&app, "dave@example.com", "password123", "Dave").await;
    let user_id = UserId::new(user["id"].as_i64().unwrap());

    let sessions = SessionRepository::new(&pool);
    sessions
        .create(
            user_id,
            "stale-token",
            SessionPurpose::Login,
            Utc::now() - Duration::minutes(1),
        )
        .await
        .unwrap();

    // First use detects expiry and deletes the row; second use must fail
    // the same way.
    let (status, _) = send(&app, Method::GET, "/auth/me", Some("stale-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/auth/me", Some("stale-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_token_cannot_be_used_as_bearer() {
    let (app, pool) = setup().await;
    register(&app, "erin@example.com", "password123", "Erin").await;

    let (status, _) = post(&app, "/auth/forgot-password", json!({ "email": "erin@example.com" })).await;
    assert_eq!(status, StatusCode::OK);

    let token: String =
        sqlx::query_scalar("SELECT token FROM sessions WHERE purpose = 'password_reset'")
            .fetch_one(&pool)
            .await
            .unwrap();

    let (status, _) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Password reset
// ============================================================================

#[tokio::test]
async fn test_forgot_password_does_not_leak_account_existence() {
    let (app, _pool) = setup().await;
    register(&app, "frank@example.com", "password123", "Frank").await;

    let (known_status, known) =
        post(&app, "/auth/forgot-password", json!({ "email": "frank@example.com" })).await;
    let (unknown_status, unknown) =
        post(&app, "/auth/forgot-password", json!({ "email": "ghost@example.com" })).await;

    assert_eq!(known_status, StatusCode::OK);
    assert_eq!(unknown_status, StatusCode::OK);
    assert_eq!(known, unknown);
}

#[tokio::test]
async fn test_password_reset_is_single_use() {
    let (app, pool) = setup().await;
    register(&app, "gina@example.com", "password123", "Gina").await;

    post(&app, "/auth/forgot-password", json!({ "email": "gina@example.com" })).await;
    let token: String =
        sqlx::query_scalar("SELECT token FROM sessions WHERE purpose = 'password_reset'")
            .fetch_one(&pool)
            .await
            .unwrap();

    let (status, _) = post(
        &app,
        "/auth/reset-password",
        json!({ "token": token, "password": "new-password-9" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Replay fails.
    let (status, body) = post(
        &app,
        "/auth/reset-password",
        json!({ "token": token, "password": "another-pass-9" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_RESET_TOKEN");

    // Old password no longer works, new one does.
    let (status, _) = login(&app, "gina@example.com", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = login(&app, "gina@example.com", "new-password-9").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_password_reset_rejects_weak_password_and_keeps_token() {
    let (app, pool) = setup().await;
    register(&app, "hank@example.com", "password123", "Hank").await;

    post(&app, "/auth/forgot-password", json!({ "email": "hank@example.com" })).await;
    let token: String =
        sqlx::query_scalar("SELECT token FROM sessions WHERE purpose = 'password_reset'")
            .fetch_one(&pool)
            .await
            .unwrap();

    let (status, body) = post(
        &app,
        "/auth/reset-password",
        json!({ "token": token, "password": "short" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "WEAK_PASSWORD");

    // The failed attempt did not consume the token.
    let (status, _) = post(
        &app,
        "/auth/reset-password",
        json!({ "token": token, "password": "long-enough-pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_reset_token_is_rejected() {
    let (app, pool) = setup().await;
    let (_, user) = register(&app, "iris@example.com", "password123", "Iris").await;
    let user_id = UserId::new(user["id"].as_i64().unwrap());

    let sessions = SessionRepository::new(&pool);
    sessions
        .create(
            user_id,
            "stale-reset",
            SessionPurpose::PasswordReset,
            Utc::now() - Duration::minutes(1),
        )
        .await
        .unwrap();

    let (status, body) = post(
        &app,
        "/auth/reset-password",
        json!({ "token": "stale-reset", "password": "new-password-9" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "EXPIRED_RESET_TOKEN");
}

// ============================================================================
// Catalog CRUD
// ============================================================================

#[tokio::test]
async fn test_product_crud_roundtrip() {
    let (app, _pool) = setup().await;

    let id = create_product(&app, "Classic Polo", 49.99, None).await;

    let (status, product) = get(&app, &format!("/products?id={id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["name"], "Classic Polo");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/products?id={id}"),
        None,
        Some(json!({ "salePrice": 39.99 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["salePrice"], 39.99);
    assert_eq!(updated["name"], "Classic Polo");

    let (status, _) = send(&app, Method::DELETE, &format!("/products?id={id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, &format!("/products?id={id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_product_listing_filters_and_sorts() {
    let (app, _pool) = setup().await;

    create_product(&app, "Alpha Polo", 30.0, None).await;
    create_product(&app, "Beta Polo", 10.0, None).await;
    create_product(&app, "Gamma Polo", 20.0, None).await;

    let (status, list) = get(&app, "/products?sort=price&order=asc").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Beta Polo", "Gamma Polo", "Alpha Polo"]);

    let (status, list) = get(&app, "/products?search=Beta").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, list) = get(&app, "/products?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_product_listing_rejects_unknown_sort_field() {
    let (app, _pool) = setup().await;

    let (status, body) = get(&app, "/products?sort=password_hash").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SORT_FIELD");
}

#[tokio::test]
async fn test_category_slug_and_conflict() {
    let (app, _pool) = setup().await;

    let (status, category) = post(
        &app,
        "/categories",
        json!({ "name": "Summer Polos", "description": "Light fabrics" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(category["slug"], "summer-polos");

    let (status, body) = post(&app, "/categories", json!({ "name": "Summer  Polos" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_item_lifecycle() {
    let (app, _pool) = setup().await;
    let product_id = create_product(&app, "Classic Polo", 49.99, None).await;

    add_cart_item(&app, product_id, 2, "cart-1").await;
    add_cart_item(&app, product_id, 1, "cart-2").await;

    let (status, items) = get(&app, "/cart-items?sessionId=cart-1").await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap().clone();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 2);
    let item_id = items[0]["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/cart-items?id={item_id}"),
        None,
        Some(json!({ "quantity": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 3);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/cart-items?id={item_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, items) = get(&app, "/cart-items?sessionId=cart-1").await;
    assert!(items.as_array().unwrap().is_empty());

    // The other session's cart is untouched.
    let (_, items) = get(&app, "/cart-items?sessionId=cart-2").await;
    assert_eq!(items.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cart_items_require_a_filter() {
    let (app, _pool) = setup().await;

    let (status, body) = get(&app, "/cart-items").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_FILTER");
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_converts_cart_to_order() {
    let (app, _pool) = setup().await;

    // On-sale product snapshots its sale price, not the regular price.
    let on_sale = create_product(&app, "Sale Polo", 20.0, Some(15.0)).await;
    let regular = create_product(&app, "Regular Polo", 10.0, None).await;

    add_cart_item(&app, on_sale, 2, "cart-co").await;
    add_cart_item(&app, regular, 1, "cart-co").await;

    // 2 * 15.00 + 1 * 10.00 = 40.00 items, plus 5.00 shipping.
    let (status, body) = post(&app, "/checkout", checkout_body("cart-co", 45.0)).await;
    assert_eq!(status, StatusCode::CREATED);

    let order = &body["order"];
    assert_eq!(order["status"], "pending");
    assert_eq!(order["totalAmount"], 45.0);
    assert_eq!(order["customerEmail"], "alice@example.com");

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    let snapshot_total: f64 = items
        .iter()
        .map(|i| i["price"].as_f64().unwrap() * i["quantity"].as_f64().unwrap())
        .sum();
    assert!((snapshot_total - 40.0).abs() < f64::EPSILON);

    // Cart cleared.
    let (_, cart) = get(&app, "/cart-items?sessionId=cart-co").await;
    assert!(cart.as_array().unwrap().is_empty());

    // Order and its items are visible through the CRUD surface.
    let order_id = order["id"].as_i64().unwrap();
    let (status, fetched) = get(&app, &format!("/orders?id={order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], order["id"]);

    let (_, fetched_items) = get(&app, &format!("/order-items?orderId={order_id}")).await;
    assert_eq!(fetched_items.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_checkout_empty_cart_is_rejected() {
    let (app, _pool) = setup().await;

    let (status, body) = post(&app, "/checkout", checkout_body("no-such-cart", 10.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMPTY_CART");
}

#[tokio::test]
async fn test_checkout_missing_field_is_rejected_before_any_write() {
    let (app, _pool) = setup().await;
    let product = create_product(&app, "Classic Polo", 49.99, None).await;
    add_cart_item(&app, product, 1, "cart-mf").await;

    let mut body = checkout_body("cart-mf", 49.99);
    body["customerPhone"] = json!("");
    let (status, response) = post(&app, "/checkout", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "MISSING_REQUIRED_FIELD");

    // Cart untouched, no order created.
    let (_, cart) = get(&app, "/cart-items?sessionId=cart-mf").await;
    assert_eq!(cart.as_array().unwrap().len(), 1);
    let (_, orders) = get(&app, "/orders").await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_with_deleted_product_leaves_no_partial_order() {
    let (app, _pool) = setup().await;

    let keep = create_product(&app, "Kept Polo", 20.0, None).await;
    let doomed = create_product(&app, "Doomed Polo", 30.0, None).await;

    add_cart_item(&app, keep, 1, "cart-dp").await;
    add_cart_item(&app, doomed, 1, "cart-dp").await;

    // Deleting a product that still sits in a cart must succeed; the cart
    // line dangles until checkout re-validates it.
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/products?id={doomed}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/checkout", checkout_body("cart-dp", 50.0)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PRODUCT_NOT_FOUND");

    // No order, no order items, cart intact.
    let (_, orders) = get(&app, "/orders").await;
    assert!(orders.as_array().unwrap().is_empty());
    let (_, cart) = get(&app, "/cart-items?sessionId=cart-dp").await;
    assert_eq!(cart.as_array().unwrap().len(), 2);
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_order_status_transitions() {
    let (app, _pool) = setup().await;
    let product = create_product(&app, "Classic Polo", 49.99, None).await;
    add_cart_item(&app, product, 1, "cart-st").await;
    let (_, body) = post(&app, "/checkout", checkout_body("cart-st", 49.99)).await;
    let order_id = body["order"]["id"].as_i64().unwrap();

    // pending -> completed is allowed.
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/orders?id={order_id}"),
        None,
        Some(json!({ "status": "completed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");

    // completed is terminal.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/orders?id={order_id}"),
        None,
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATUS_TRANSITION");

    // Unknown statuses never reach the database.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/orders?id={order_id}"),
        None,
        Some(json!({ "status": "shipped" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATUS");
}

#[tokio::test]
async fn test_order_list_filters_by_status() {
    let (app, _pool) = setup().await;

    let (status, _) = post(
        &app,
        "/orders",
        json!({
            "customerName": "Walt",
            "customerEmail": "walt@example.com",
            "customerPhone": "+1 555 0101",
            "shippingAddress": "2 Side St",
            "totalAmount": 12.5,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, pending) = get(&app, "/orders?status=pending").await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (_, completed) = get(&app, "/orders?status=completed").await;
    assert!(completed.as_array().unwrap().is_empty());

    let (status, body) = get(&app, "/orders?status=shipped").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATUS");
}
