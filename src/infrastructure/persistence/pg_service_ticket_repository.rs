//! PostgreSQL implementation of service ticket repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{MechanicEdit, NewServiceTicket, ServiceTicket, ServiceTicketPatch};
use crate::domain::repositories::ServiceTicketRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct ServiceTicketRow {
    id: i64,
    service_date: NaiveDate,
    customer_id: i64,
    mechanic_ids: Vec<i64>,
    inventory_ids: Vec<i64>,
}

impl From<ServiceTicketRow> for ServiceTicket {
    fn from(r: ServiceTicketRow) -> Self {
        ServiceTicket {
            id: r.id,
            service_date: r.service_date,
            customer_id: r.customer_id,
            mechanic_ids: r.mechanic_ids,
            inventory_ids: r.inventory_ids,
        }
    }
}

/// PostgreSQL repository for tickets and their `service_mechanic` /
/// `service_ticket_inventory` join tables.
///
/// Membership inserts use `ON CONFLICT DO NOTHING` against the composite
/// primary keys, so concurrent duplicate assignments collapse into one row.
pub struct PgServiceTicketRepository {
    pool: Arc<PgPool>,
}

impl PgServiceTicketRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceTicketRepository for PgServiceTicketRepository {
    async fn create(&self, new_ticket: NewServiceTicket) -> Result<ServiceTicket, AppError> {
        let row = sqlx::query_as::<_, ServiceTicketRow>(
            r#"
            INSERT INTO service_tickets (service_date, customer_id)
            VALUES ($1, $2)
            RETURNING
                id,
                service_date,
                customer_id,
                ARRAY[]::BIGINT[] AS mechanic_ids,
                ARRAY[]::BIGINT[] AS inventory_ids
            "#,
        )
        .bind(new_ticket.service_date)
        .bind(new_ticket.customer_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceTicket>, AppError> {
        let row = sqlx::query_as::<_, ServiceTicketRow>(
            r#"
            SELECT
                t.id,
                t.service_date,
                t.customer_id,
                ARRAY(
                    SELECT sm.mechanic_id FROM service_mechanic sm
                    WHERE sm.service_ticket_id = t.id ORDER BY sm.mechanic_id
                ) AS mechanic_ids,
                ARRAY(
                    SELECT si.inventory_id FROM service_ticket_inventory si
                    WHERE si.service_ticket_id = t.id ORDER BY si.inventory_id
                ) AS inventory_ids
            FROM service_tickets t
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ServiceTicket::from))
    }

    async fn list(&self) -> Result<Vec<ServiceTicket>, AppError> {
        let rows = sqlx::query_as::<_, ServiceTicketRow>(
            r#"
            SELECT
                t.id,
                t.service_date,
                t.customer_id,
                ARRAY(
                    SELECT sm.mechanic_id FROM service_mechanic sm
                    WHERE sm.service_ticket_id = t.id ORDER BY sm.mechanic_id
                ) AS mechanic_ids,
                ARRAY(
                    SELECT si.inventory_id FROM service_ticket_inventory si
                    WHERE si.service_ticket_id = t.id ORDER BY si.inventory_id
                ) AS inventory_ids
            FROM service_tickets t
            ORDER BY t.id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ServiceTicket::from).collect())
    }

    async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<ServiceTicket>, AppError> {
        let rows = sqlx::query_as::<_, ServiceTicketRow>(
            r#"
            SELECT
                t.id,
                t.service_date,
                t.customer_id,
                ARRAY(
                    SELECT sm.mechanic_id FROM service_mechanic sm
                    WHERE sm.service_ticket_id = t.id ORDER BY sm.mechanic_id
                ) AS mechanic_ids,
                ARRAY(
                    SELECT si.inventory_id FROM service_ticket_inventory si
                    WHERE si.service_ticket_id = t.id ORDER BY si.inventory_id
                ) AS inventory_ids
            FROM service_tickets t
            WHERE t.customer_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ServiceTicket::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        patch: ServiceTicketPatch,
    ) -> Result<Option<ServiceTicket>, AppError> {
        let row = sqlx::query_as::<_, ServiceTicketRow>(
            r#"
            WITH updated AS (
                UPDATE service_tickets SET
                    service_date = COALESCE($2::DATE, service_date),
                    customer_id  = COALESCE($3::BIGINT, customer_id)
                WHERE id = $1
                RETURNING id, service_date, customer_id
            )
            SELECT
                u.id,
                u.service_date,
                u.customer_id,
                ARRAY(
                    SELECT sm.mechanic_id FROM service_mechanic sm
                    WHERE sm.service_ticket_id = u.id ORDER BY sm.mechanic_id
                ) AS mechanic_ids,
                ARRAY(
                    SELECT si.inventory_id FROM service_ticket_inventory si
                    WHERE si.service_ticket_id = u.id ORDER BY si.inventory_id
                ) AS inventory_ids
            FROM updated u
            "#,
        )
        .bind(id)
        .bind(patch.service_date)
        .bind(patch.customer_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ServiceTicket::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM service_tickets WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_mechanic(&self, ticket_id: i64, mechanic_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO service_mechanic (service_ticket_id, mechanic_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(ticket_id)
        .bind(mechanic_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn remove_mechanic(&self, ticket_id: i64, mechanic_id: i64) -> Result<(), AppError> {
        sqlx::query(
            "DELETE FROM service_mechanic WHERE service_ticket_id = $1 AND mechanic_id = $2",
        )
        .bind(ticket_id)
        .bind(mechanic_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn edit_mechanics(&self, ticket_id: i64, edit: MechanicEdit) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // Unknown mechanic ids simply produce no row to insert.
        sqlx::query(
            r#"
            INSERT INTO service_mechanic (service_ticket_id, mechanic_id)
            SELECT $1, m.id FROM mechanics m WHERE m.id = ANY($2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(ticket_id)
        .bind(&edit.add_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM service_mechanic WHERE service_ticket_id = $1 AND mechanic_id = ANY($2)",
        )
        .bind(ticket_id)
        .bind(&edit.remove_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn add_part(&self, ticket_id: i64, inventory_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO service_ticket_inventory (service_ticket_id, inventory_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(ticket_id)
        .bind(inventory_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn remove_part(&self, ticket_id: i64, inventory_id: i64) -> Result<(), AppError> {
        sqlx::query(
            "DELETE FROM service_ticket_inventory WHERE service_ticket_id = $1 AND inventory_id = $2",
        )
        .bind(ticket_id)
        .bind(inventory_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
