//! PostgreSQL implementation of customer repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Customer, CustomerPatch, NewCustomer};
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    dob: Option<NaiveDate>,
    password_hash: String,
}

impl From<CustomerRow> for Customer {
    fn from(r: CustomerRow) -> Self {
        Customer::new(r.id, r.name, r.email, r.dob, r.password_hash)
    }
}

/// PostgreSQL repository for customers.
///
/// Email uniqueness is enforced by the `customers_email_key` constraint; a
/// violation surfaces as [`AppError::Conflict`].
pub struct PgCustomerRepository {
    pool: Arc<PgPool>,
}

impl PgCustomerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn create(&self, new_customer: NewCustomer) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (name, email, dob, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, dob, password_hash
            "#,
        )
        .bind(new_customer.name)
        .bind(new_customer.email)
        .bind(new_customer.dob)
        .bind(new_customer.password_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, name, email, dob, password_hash
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, name, email, dob, password_hash
            FROM customers
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, name, email, dob, password_hash
            FROM customers
            ORDER BY id
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, patch: CustomerPatch) -> Result<Option<Customer>, AppError> {
        let update_dob = patch.dob.is_some();
        let new_dob = patch.dob.flatten();

        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            UPDATE customers SET
                name          = COALESCE($2::TEXT, name),
                email         = COALESCE($3::TEXT, email),
                dob           = CASE WHEN $4 THEN $5::DATE ELSE dob END,
                password_hash = COALESCE($6::TEXT, password_hash)
            WHERE id = $1
            RETURNING id, name, email, dob, password_hash
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(update_dob)
        .bind(new_dob)
        .bind(patch.password_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
