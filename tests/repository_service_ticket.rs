mod common;

use chrono::NaiveDate;
use mechanic_shop::domain::entities::{MechanicEdit, NewServiceTicket, ServiceTicketPatch};
use mechanic_shop::domain::repositories::{MechanicRepository, ServiceTicketRepository};
use mechanic_shop::error::AppError;
use mechanic_shop::infrastructure::persistence::{PgMechanicRepository, PgServiceTicketRepository};
use sqlx::PgPool;
use std::sync::Arc;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
}

#[sqlx::test]
async fn test_create_returns_empty_associations(pool: PgPool) {
    let customer_id = common::create_test_customer(&pool, "C", "c@example.com").await;
    let repo = PgServiceTicketRepository::new(Arc::new(pool));

    let ticket = repo
        .create(NewServiceTicket {
            service_date: date(1),
            customer_id,
        })
        .await
        .unwrap();

    assert_eq!(ticket.customer_id, customer_id);
    assert_eq!(ticket.service_date, date(1));
    assert!(ticket.mechanic_ids.is_empty());
    assert!(ticket.inventory_ids.is_empty());
}

#[sqlx::test]
async fn test_create_with_missing_customer_is_rejected(pool: PgPool) {
    let repo = PgServiceTicketRepository::new(Arc::new(pool));

    let result = repo
        .create(NewServiceTicket {
            service_date: date(1),
            customer_id: 12345,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest { .. })));
}

#[sqlx::test]
async fn test_associations_are_sorted_and_deduplicated(pool: PgPool) {
    let customer_id = common::create_test_customer(&pool, "C", "c@example.com").await;
    let ticket_id = common::create_test_ticket(&pool, customer_id, "2024-09-02").await;
    let first = common::create_test_mechanic(&pool, "A", "a@shop.test").await;
    let second = common::create_test_mechanic(&pool, "B", "b@shop.test").await;
    let part = common::create_test_part(&pool, "Gasket", "6.40").await;
    let repo = PgServiceTicketRepository::new(Arc::new(pool));

    repo.add_mechanic(ticket_id, second).await.unwrap();
    repo.add_mechanic(ticket_id, first).await.unwrap();
    repo.add_mechanic(ticket_id, first).await.unwrap();
    repo.add_part(ticket_id, part).await.unwrap();
    repo.add_part(ticket_id, part).await.unwrap();

    let ticket = repo.find_by_id(ticket_id).await.unwrap().unwrap();
    assert_eq!(ticket.mechanic_ids, vec![first, second]);
    assert_eq!(ticket.inventory_ids, vec![part]);

    repo.remove_mechanic(ticket_id, first).await.unwrap();
    repo.remove_part(ticket_id, part).await.unwrap();

    let ticket = repo.find_by_id(ticket_id).await.unwrap().unwrap();
    assert_eq!(ticket.mechanic_ids, vec![second]);
    assert!(ticket.inventory_ids.is_empty());
}

#[sqlx::test]
async fn test_edit_mechanics_skips_unknown_ids(pool: PgPool) {
    let customer_id = common::create_test_customer(&pool, "C", "c@example.com").await;
    let ticket_id = common::create_test_ticket(&pool, customer_id, "2024-09-03").await;
    let kept = common::create_test_mechanic(&pool, "Kept", "kept@shop.test").await;
    let dropped = common::create_test_mechanic(&pool, "Dropped", "dropped@shop.test").await;
    common::assign_test_mechanic(&pool, ticket_id, dropped).await;
    let repo = PgServiceTicketRepository::new(Arc::new(pool));

    repo.edit_mechanics(
        ticket_id,
        MechanicEdit {
            add_ids: vec![kept, 4040],
            remove_ids: vec![dropped, 5050],
        },
    )
    .await
    .unwrap();

    let ticket = repo.find_by_id(ticket_id).await.unwrap().unwrap();
    assert_eq!(ticket.mechanic_ids, vec![kept]);
}

#[sqlx::test]
async fn test_update_and_list_by_customer(pool: PgPool) {
    let first = common::create_test_customer(&pool, "First", "first@example.com").await;
    let second = common::create_test_customer(&pool, "Second", "second@example.com").await;
    let ticket_id = common::create_test_ticket(&pool, first, "2024-09-04").await;
    common::create_test_ticket(&pool, second, "2024-09-05").await;
    let repo = PgServiceTicketRepository::new(Arc::new(pool));

    let moved = repo
        .update(
            ticket_id,
            ServiceTicketPatch {
                customer_id: Some(second),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.customer_id, second);
    assert_eq!(moved.service_date, date(4));

    assert!(repo.list_by_customer(first).await.unwrap().is_empty());
    assert_eq!(repo.list_by_customer(second).await.unwrap().len(), 2);
    assert_eq!(repo.list().await.unwrap().len(), 2);
}

#[sqlx::test]
async fn test_mechanic_ranking_counts_distinct_tickets(pool: PgPool) {
    let customer_id = common::create_test_customer(&pool, "C", "c@example.com").await;
    let mechanic = common::create_test_mechanic(&pool, "Solo", "solo@shop.test").await;
    let idle = common::create_test_mechanic(&pool, "Idle", "idle@shop.test").await;
    for day in ["2024-09-06", "2024-09-07"] {
        let ticket = common::create_test_ticket(&pool, customer_id, day).await;
        common::assign_test_mechanic(&pool, ticket, mechanic).await;
    }
    let repo = PgMechanicRepository::new(Arc::new(pool));

    let ranking = repo.ranking().await.unwrap();

    let counts: Vec<(i64, i64)> = ranking
        .iter()
        .map(|r| (r.mechanic.id, r.ticket_count))
        .collect();
    assert_eq!(counts, vec![(mechanic, 2), (idle, 0)]);
}
