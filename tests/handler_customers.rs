mod common;

use axum::http::StatusCode;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use sqlx::PgPool;

// ─── Create / read / update / delete ─────────────────────────────────────────

#[sqlx::test]
async fn test_customer_lifecycle(pool: PgPool) {
    let server = common::make_server(pool);

    let created = common::register_customer(&server, "jane@example.com", "hunter2").await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["email"], "jane@example.com");
    assert_eq!(created["dob"], "1990-04-12");
    assert!(created.get("password").is_none());
    assert!(created.get("password_hash").is_none());

    let fetched = server.get(&format!("/customers/{id}")).await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>()["name"], "Jane Driver");

    let updated = server
        .put(&format!("/customers/{id}"))
        .json(&json!({ "name": "Jane Racer" }))
        .await;
    updated.assert_status_ok();
    let body = updated.json::<Value>();
    assert_eq!(body["name"], "Jane Racer");
    assert_eq!(body["email"], "jane@example.com");
    assert_eq!(body["dob"], "1990-04-12");

    let deleted = server.delete(&format!("/customers/{id}")).await;
    deleted.assert_status_ok();
    assert_eq!(
        deleted.json::<Value>()["message"],
        format!("Customer id: {id}, successfully deleted.")
    );

    server
        .get(&format!("/customers/{id}"))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_create_customer_duplicate_email(pool: PgPool) {
    let server = common::make_server(pool.clone());
    common::register_customer(&server, "dup@example.com", "pw").await;

    let response = server
        .post("/customers")
        .json(&json!({ "name": "Other", "email": "dup@example.com", "password": "pw" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"],
        "Email already associated with an account."
    );
    assert_eq!(common::count_rows(&pool, "customers").await, 1);
}

#[sqlx::test]
async fn test_create_customer_missing_fields(pool: PgPool) {
    let server = common::make_server(pool.clone());

    let response = server
        .post("/customers")
        .json(&json!({ "name": "No Password", "email": "not-an-email" }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["password"], json!(["Missing data for required field."]));
    assert_eq!(body["email"], json!(["Not a valid email address."]));
    assert_eq!(common::count_rows(&pool, "customers").await, 0);
}

#[sqlx::test]
async fn test_create_customer_empty_body_reports_every_field(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server
        .post("/customers")
        .content_type("application/json")
        .bytes("".into())
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    for field in ["name", "email", "password"] {
        assert_eq!(body[field], json!(["Missing data for required field."]));
    }
}

#[sqlx::test]
async fn test_customer_name_wider_than_column(pool: PgPool) {
    let customer_id = common::create_test_customer(&pool, "Short", "short@example.com").await;
    let server = common::make_server(pool);

    let response = server
        .put(&format!("/customers/{customer_id}"))
        .json(&json!({ "name": "x".repeat(256) }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["name"],
        json!(["Longer than maximum length 255."])
    );
}

#[sqlx::test]
async fn test_update_customer_clears_dob_with_null(pool: PgPool) {
    let server = common::make_server(pool);
    let created = common::register_customer(&server, "dob@example.com", "pw").await;
    let id = created["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/customers/{id}"))
        .json(&json!({ "dob": null }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["dob"], Value::Null);
}

#[sqlx::test]
async fn test_update_customer_to_taken_email(pool: PgPool) {
    let server = common::make_server(pool);
    common::register_customer(&server, "first@example.com", "pw").await;
    let second = common::register_customer(&server, "second@example.com", "pw").await;
    let id = second["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/customers/{id}"))
        .json(&json!({ "email": "first@example.com" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"],
        "Email already associated with an account."
    );
}

#[sqlx::test]
async fn test_update_missing_customer(pool: PgPool) {
    let server = common::make_server(pool);

    server
        .put("/customers/9999")
        .json(&json!({ "name": "Ghost" }))
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_delete_missing_customer(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.delete("/customers/9999").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"], "Customer not found.");
}

#[sqlx::test]
async fn test_delete_customer_cascades_to_tickets(pool: PgPool) {
    let customer_id = common::create_test_customer(&pool, "Cascade", "cascade@example.com").await;
    let mechanic_id = common::create_test_mechanic(&pool, "Mo", "mo@example.com").await;
    let part_id = common::create_test_part(&pool, "Wiper blade", "14.50").await;
    let ticket_id = common::create_test_ticket(&pool, customer_id, "2024-05-01").await;
    common::assign_test_mechanic(&pool, ticket_id, mechanic_id).await;

    let server = common::make_server(pool.clone());
    server
        .put(&format!("/service-tickets/{ticket_id}/add-part/{part_id}"))
        .await
        .assert_status_ok();
    assert_eq!(common::count_rows(&pool, "service_ticket_inventory").await, 1);

    server
        .delete(&format!("/customers/{customer_id}"))
        .await
        .assert_status_ok();

    assert_eq!(common::count_rows(&pool, "service_tickets").await, 0);
    assert_eq!(common::count_rows(&pool, "service_mechanic").await, 0);
    assert_eq!(common::count_rows(&pool, "service_ticket_inventory").await, 0);
    assert_eq!(common::count_rows(&pool, "mechanics").await, 1);
    assert_eq!(common::count_rows(&pool, "inventory").await, 1);
    server
        .get(&format!("/inventory/{part_id}"))
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_non_integer_id_is_not_found(pool: PgPool) {
    let server = common::make_server(pool);

    server.get("/customers/abc").await.assert_status_not_found();
}

// ─── Pagination ──────────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_list_customers_paginated(pool: PgPool) {
    for i in 0..12 {
        common::create_test_customer(&pool, &format!("C{i}"), &format!("c{i}@example.com")).await;
    }
    let server = common::make_server(pool);

    let response = server
        .get("/customers")
        .add_query_param("page", 2)
        .add_query_param("per_page", 5)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total"], 12);
    assert_eq!(body["pages"], 3);
    assert_eq!(body["current_page"], 2);
    assert_eq!(body["per_page"], 5);
    let customers = body["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 5);
    assert_eq!(customers[0]["name"], "C5");
}

#[sqlx::test]
async fn test_list_customers_defaults(pool: PgPool) {
    common::create_test_customer(&pool, "Only", "only@example.com").await;
    let server = common::make_server(pool);

    let body = server.get("/customers").await.json::<Value>();

    assert_eq!(body["current_page"], 1);
    assert_eq!(body["per_page"], 10);
    assert_eq!(body["pages"], 1);
    assert_eq!(body["customers"].as_array().unwrap().len(), 1);
}

#[sqlx::test]
async fn test_list_customers_rejects_bad_page(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.get("/customers").add_query_param("page", 0).await;
    response.assert_status_bad_request();
    assert!(response.json::<Value>().get("page").is_some());

    server
        .get("/customers")
        .add_query_param("per_page", "lots")
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_list_customers_rejects_huge_page(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server
        .get("/customers")
        .add_query_param("page", i64::MAX)
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["page"],
        json!(["Page is too large."])
    );
}

#[sqlx::test]
async fn test_trailing_slash_reaches_same_route(pool: PgPool) {
    common::create_test_customer(&pool, "Slash", "slash@example.com").await;
    let server = common::make_server(pool);

    let response = server.get("/customers/").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["total"], 1);
}

// ─── Login and my-tickets ────────────────────────────────────────────────────

#[sqlx::test]
async fn test_login_and_list_my_tickets(pool: PgPool) {
    let server = common::make_server(pool.clone());
    let created = common::register_customer(&server, "owner@example.com", "s3cret").await;
    let customer_id = created["id"].as_i64().unwrap();

    let other_id = common::create_test_customer(&pool, "Other", "other@example.com").await;
    common::create_test_ticket(&pool, customer_id, "2024-03-01").await;
    common::create_test_ticket(&pool, customer_id, "2024-03-02").await;
    common::create_test_ticket(&pool, other_id, "2024-03-03").await;

    let token = common::login(&server, "owner@example.com", "s3cret").await;

    let response = server
        .get("/customers/my-tickets")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let tickets = response.json::<Vec<Value>>();
    assert_eq!(tickets.len(), 2);
    assert!(tickets.iter().all(|t| t["customer_id"] == customer_id));
}

#[sqlx::test]
async fn test_my_tickets_accepts_raw_token(pool: PgPool) {
    let server = common::make_server(pool);
    common::register_customer(&server, "raw@example.com", "pw").await;
    let token = common::login(&server, "raw@example.com", "pw").await;

    let response = server
        .get("/customers/my-tickets")
        .add_header("Authorization", token)
        .await;

    response.assert_status_ok();
    assert!(response.json::<Vec<Value>>().is_empty());
}

#[sqlx::test]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let server = common::make_server(pool);
    common::register_customer(&server, "known@example.com", "right").await;

    let wrong_password = server
        .post("/customers/login")
        .json(&json!({ "email": "known@example.com", "password": "wrong" }))
        .await;
    let unknown_email = server
        .post("/customers/login")
        .json(&json!({ "email": "nobody@example.com", "password": "right" }))
        .await;

    wrong_password.assert_status_unauthorized();
    unknown_email.assert_status_unauthorized();
    assert_eq!(
        wrong_password.json::<Value>(),
        unknown_email.json::<Value>()
    );
}

#[sqlx::test]
async fn test_login_requires_fields(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server
        .post("/customers/login")
        .json(&json!({ "email": "someone@example.com" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["password"],
        json!(["Missing data for required field."])
    );
}

#[sqlx::test]
async fn test_my_tickets_without_token(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.get("/customers/my-tickets").await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["error"], "Token is missing");
}

#[sqlx::test]
async fn test_my_tickets_with_tampered_token(pool: PgPool) {
    let server = common::make_server(pool);
    common::register_customer(&server, "tamper@example.com", "pw").await;
    let token = common::login(&server, "tamper@example.com", "pw").await;

    let mut tampered = token.clone();
    tampered.push('x');

    let response = server
        .get("/customers/my-tickets")
        .authorization_bearer(&tampered)
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["error"], "Token is invalid");
}

#[derive(serde::Serialize)]
struct RawClaims {
    customer_id: i64,
    iat: i64,
    exp: i64,
}

fn sign(claims: &RawClaims) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(common::TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

#[sqlx::test]
async fn test_my_tickets_with_expired_token(pool: PgPool) {
    let customer_id = common::create_test_customer(&pool, "Late", "late@example.com").await;
    let server = common::make_server(pool);

    let now = chrono::Utc::now().timestamp();
    let token = sign(&RawClaims {
        customer_id,
        iat: now - 7200,
        exp: now - 3600,
    });

    server
        .get("/customers/my-tickets")
        .authorization_bearer(&token)
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_token_of_deleted_customer_is_rejected(pool: PgPool) {
    let customer_id = common::create_test_customer(&pool, "Gone", "gone@example.com").await;
    let server = common::make_server(pool);

    let now = chrono::Utc::now().timestamp();
    let token = sign(&RawClaims {
        customer_id,
        iat: now,
        exp: now + 3600,
    });

    server
        .delete(&format!("/customers/{customer_id}"))
        .await
        .assert_status_ok();

    let response = server
        .get("/customers/my-tickets")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
