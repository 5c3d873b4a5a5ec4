#![allow(dead_code)]

use axum_test::TestServer;
use mechanic_shop::infrastructure::cache::{CacheService, MemoryCache, NullCache};
use mechanic_shop::routes::app_router;
use mechanic_shop::state::{AppState, StateSettings};
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

fn settings(rate_limit_enabled: bool) -> StateSettings {
    StateSettings {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_ttl_hours: 1,
        bcrypt_cost: 4,
        rate_limit_enabled,
        behind_proxy: false,
    }
}

/// State with rate limits off and no response cache.
pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), Arc::new(NullCache::new()), settings(false))
}

/// State with rate limits on and an in-process response cache.
pub fn create_policy_state(pool: PgPool) -> AppState {
    let cache: Arc<dyn CacheService> = Arc::new(MemoryCache::new(100));
    AppState::new(Arc::new(pool), cache, settings(true))
}

pub fn make_server(pool: PgPool) -> TestServer {
    TestServer::new(app_router(create_test_state(pool))).unwrap()
}

pub fn make_policy_server(pool: PgPool) -> TestServer {
    TestServer::new(app_router(create_policy_state(pool))).unwrap()
}

pub async fn create_test_customer(pool: &PgPool, name: &str, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO customers (name, email, password_hash) VALUES ($1, $2, 'not-a-hash') RETURNING id",
    )
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_mechanic(pool: &PgPool, name: &str, email: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO mechanics (name, email, specialization, experience) VALUES ($1, $2, 'Engines', 5) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_part(pool: &PgPool, name: &str, price: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO inventory (name, price) VALUES ($1, $2::numeric) RETURNING id")
        .bind(name)
        .bind(price)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_ticket(pool: &PgPool, customer_id: i64, service_date: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO service_tickets (service_date, customer_id) VALUES ($1::date, $2) RETURNING id",
    )
    .bind(service_date)
    .bind(customer_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn assign_test_mechanic(pool: &PgPool, ticket_id: i64, mechanic_id: i64) {
    sqlx::query("INSERT INTO service_mechanic (service_ticket_id, mechanic_id) VALUES ($1, $2)")
        .bind(ticket_id)
        .bind(mechanic_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Registers a customer through the API and returns its JSON body.
pub async fn register_customer(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/customers")
        .json(&json!({
            "name": "Jane Driver",
            "email": email,
            "dob": "1990-04-12",
            "password": password,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Logs in through the API and returns the bearer token.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/customers/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}
