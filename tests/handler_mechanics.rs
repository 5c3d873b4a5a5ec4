mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

fn mechanic_body(email: &str) -> Value {
    json!({
        "name": "Max Torque",
        "email": email,
        "specialization": "Transmissions",
        "experience": 7,
    })
}

#[sqlx::test]
async fn test_mechanic_lifecycle(pool: PgPool) {
    let server = common::make_server(pool);

    let created = server
        .post("/mechanics")
        .json(&mechanic_body("max@shop.test"))
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_i64().unwrap();

    let updated = server
        .put(&format!("/mechanics/{id}"))
        .json(&json!({ "experience": 8 }))
        .await;
    updated.assert_status_ok();
    let body = updated.json::<Value>();
    assert_eq!(body["experience"], 8);
    assert_eq!(body["specialization"], "Transmissions");

    let listed = server.get("/mechanics").await.json::<Vec<Value>>();
    assert_eq!(listed.len(), 1);

    let deleted = server.delete(&format!("/mechanics/{id}")).await;
    deleted.assert_status_ok();
    assert_eq!(
        deleted.json::<Value>()["message"],
        format!("Mechanic id: {id}, successfully deleted.")
    );

    let missing = server.get(&format!("/mechanics/{id}")).await;
    missing.assert_status_not_found();
    assert_eq!(missing.json::<Value>()["error"], "Mechanic not found");
}

#[sqlx::test]
async fn test_create_mechanic_validation(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server
        .post("/mechanics")
        .json(&json!({ "name": "", "email": "x@shop.test", "experience": -1 }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["name"], json!(["Shorter than minimum length 1."]));
    assert_eq!(
        body["specialization"],
        json!(["Missing data for required field."])
    );
    assert_eq!(
        body["experience"],
        json!(["Must be greater than or equal to 0."])
    );
}

#[sqlx::test]
async fn test_mechanic_text_wider_than_column(pool: PgPool) {
    let server = common::make_server(pool.clone());

    let response = server
        .post("/mechanics")
        .json(&json!({
            "name": "Long",
            "email": "long@shop.test",
            "specialization": "s".repeat(300),
            "experience": 2,
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["specialization"],
        json!(["Longer than maximum length 255."])
    );
    assert_eq!(common::count_rows(&pool, "mechanics").await, 0);
}

#[sqlx::test]
async fn test_create_mechanic_duplicate_email(pool: PgPool) {
    common::create_test_mechanic(&pool, "First", "taken@shop.test").await;
    let server = common::make_server(pool);

    let response = server
        .post("/mechanics")
        .json(&mechanic_body("taken@shop.test"))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"],
        "Email already associated with a mechanic."
    );
}

#[sqlx::test]
async fn test_delete_mechanic_removes_assignments(pool: PgPool) {
    let customer_id = common::create_test_customer(&pool, "C", "c@example.com").await;
    let mechanic_id = common::create_test_mechanic(&pool, "M", "m@shop.test").await;
    let ticket_id = common::create_test_ticket(&pool, customer_id, "2024-01-10").await;
    common::assign_test_mechanic(&pool, ticket_id, mechanic_id).await;

    let server = common::make_server(pool.clone());
    server
        .delete(&format!("/mechanics/{mechanic_id}"))
        .await
        .assert_status_ok();

    let ticket = server
        .get(&format!("/service-tickets/{ticket_id}"))
        .await
        .json::<Value>();
    assert_eq!(ticket["mechanic_ids"], json!([]));
    assert_eq!(common::count_rows(&pool, "service_tickets").await, 1);
}

#[sqlx::test]
async fn test_ranking_orders_by_ticket_count(pool: PgPool) {
    let customer_id = common::create_test_customer(&pool, "C", "c@example.com").await;
    let idle = common::create_test_mechanic(&pool, "Idle", "idle@shop.test").await;
    let busy = common::create_test_mechanic(&pool, "Busy", "busy@shop.test").await;
    let some = common::create_test_mechanic(&pool, "Some", "some@shop.test").await;

    for day in 1..=3 {
        let date = format!("2024-02-0{day}");
        let ticket = common::create_test_ticket(&pool, customer_id, &date).await;
        common::assign_test_mechanic(&pool, ticket, busy).await;
        if day == 1 {
            common::assign_test_mechanic(&pool, ticket, some).await;
        }
    }

    let server = common::make_server(pool);
    let response = server.get("/mechanics/ranking").await;

    response.assert_status_ok();
    let ranking = response.json::<Vec<Value>>();
    let order: Vec<(i64, i64)> = ranking
        .iter()
        .map(|m| (m["id"].as_i64().unwrap(), m["ticket_count"].as_i64().unwrap()))
        .collect();
    assert_eq!(order, vec![(busy, 3), (some, 1), (idle, 0)]);
    assert_eq!(ranking[0]["name"], "Busy");
}

#[sqlx::test]
async fn test_ranking_empty(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.get("/mechanics/ranking").await;

    response.assert_status_ok();
    assert!(response.json::<Vec<Value>>().is_empty());
}
