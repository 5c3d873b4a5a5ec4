//! PostgreSQL implementation of mechanic repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Mechanic, MechanicPatch, NewMechanic, RankedMechanic};
use crate::domain::repositories::MechanicRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct MechanicRow {
    id: i64,
    name: String,
    email: String,
    specialization: String,
    experience: i32,
}

impl From<MechanicRow> for Mechanic {
    fn from(r: MechanicRow) -> Self {
        Mechanic::new(r.id, r.name, r.email, r.specialization, r.experience)
    }
}

#[derive(FromRow)]
struct RankedMechanicRow {
    #[sqlx(flatten)]
    mechanic: MechanicRow,
    ticket_count: i64,
}

/// PostgreSQL repository for mechanics.
pub struct PgMechanicRepository {
    pool: Arc<PgPool>,
}

impl PgMechanicRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MechanicRepository for PgMechanicRepository {
    async fn create(&self, new_mechanic: NewMechanic) -> Result<Mechanic, AppError> {
        let row = sqlx::query_as::<_, MechanicRow>(
            r#"
            INSERT INTO mechanics (name, email, specialization, experience)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, specialization, experience
            "#,
        )
        .bind(new_mechanic.name)
        .bind(new_mechanic.email)
        .bind(new_mechanic.specialization)
        .bind(new_mechanic.experience)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Mechanic>, AppError> {
        let row = sqlx::query_as::<_, MechanicRow>(
            r#"
            SELECT id, name, email, specialization, experience
            FROM mechanics
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mechanic::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Mechanic>, AppError> {
        let row = sqlx::query_as::<_, MechanicRow>(
            r#"
            SELECT id, name, email, specialization, experience
            FROM mechanics
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mechanic::from))
    }

    async fn list(&self) -> Result<Vec<Mechanic>, AppError> {
        let rows = sqlx::query_as::<_, MechanicRow>(
            r#"
            SELECT id, name, email, specialization, experience
            FROM mechanics
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Mechanic::from).collect())
    }

    async fn ranking(&self) -> Result<Vec<RankedMechanic>, AppError> {
        let rows = sqlx::query_as::<_, RankedMechanicRow>(
            r#"
            SELECT
                m.id,
                m.name,
                m.email,
                m.specialization,
                m.experience,
                COUNT(DISTINCT sm.service_ticket_id) AS ticket_count
            FROM mechanics m
            LEFT JOIN service_mechanic sm ON sm.mechanic_id = m.id
            GROUP BY m.id
            ORDER BY ticket_count DESC, m.id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RankedMechanic {
                mechanic: r.mechanic.into(),
                ticket_count: r.ticket_count,
            })
            .collect())
    }

    async fn update(&self, id: i64, patch: MechanicPatch) -> Result<Option<Mechanic>, AppError> {
        let row = sqlx::query_as::<_, MechanicRow>(
            r#"
            UPDATE mechanics SET
                name           = COALESCE($2::TEXT, name),
                email          = COALESCE($3::TEXT, email),
                specialization = COALESCE($4::TEXT, specialization),
                experience     = COALESCE($5::INTEGER, experience)
            WHERE id = $1
            RETURNING id, name, email, specialization, experience
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.specialization)
        .bind(patch.experience)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mechanic::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM mechanics WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
