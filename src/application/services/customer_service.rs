//! Customer lifecycle service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tracing::info;

use super::password::hash_password;
use crate::domain::entities::{Customer, CustomerPatch, NewCustomer};
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;
use crate::utils::db_error::{CUSTOMERS_EMAIL_KEY, conflict_message};

/// Plaintext registration data; the password is hashed by the service.
#[derive(Debug)]
pub struct CustomerRegistration {
    pub name: String,
    pub email: String,
    pub dob: Option<NaiveDate>,
    pub password: String,
}

/// Fields of a customer update as received from the client.
///
/// `dob: Some(None)` clears the date of birth.
#[derive(Debug, Default)]
pub struct CustomerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<Option<NaiveDate>>,
    pub password: Option<String>,
}

/// One page of customers plus totals.
#[derive(Debug)]
pub struct CustomerPage {
    pub customers: Vec<Customer>,
    pub total: i64,
    pub pages: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Service for creating, reading, updating and deleting customers.
///
/// Passwords are bcrypt-hashed with `bcrypt_cost` before they reach the
/// repository.
pub struct CustomerService<R: CustomerRepository> {
    repository: Arc<R>,
    bcrypt_cost: u32,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: Arc<R>, bcrypt_cost: u32) -> Self {
        Self {
            repository,
            bcrypt_cost,
        }
    }

    /// Registers a customer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already associated with
    /// a customer (checked up front, and again by the unique constraint).
    pub async fn create(&self, registration: CustomerRegistration) -> Result<Customer, AppError> {
        self.ensure_email_free(&registration.email, None).await?;

        let password_hash = hash_password(registration.password, self.bcrypt_cost).await?;
        let customer = self
            .repository
            .create(NewCustomer {
                name: registration.name,
                email: registration.email,
                dob: registration.dob,
                password_hash,
            })
            .await?;

        info!(customer_id = customer.id, "Customer created");
        Ok(customer)
    }

    /// Retrieves a customer by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no customer has that id.
    pub async fn get(&self, id: i64) -> Result<Customer, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Returns one page of customers ordered by id.
    ///
    /// `page` is 1-based. A page past the end is empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on `page` if its offset overflows `i64`.
    pub async fn list_paginated(&self, page: i64, per_page: i64) -> Result<CustomerPage, AppError> {
        let offset = page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(per_page))
            .ok_or_else(|| AppError::invalid_field("page", "Page is too large."))?;

        let (customers, total) = tokio::try_join!(
            self.repository.list(offset, per_page),
            self.repository.count()
        )?;

        Ok(CustomerPage {
            customers,
            total,
            pages: (total + per_page - 1) / per_page,
            page,
            per_page,
        })
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the customer does not exist.
    /// Returns [`AppError::Conflict`] if the new email belongs to another customer.
    pub async fn update(&self, id: i64, changes: CustomerChanges) -> Result<Customer, AppError> {
        let existing = self.get(id).await?;

        if let Some(email) = changes.email.as_deref()
            && email != existing.email
        {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let password_hash = match changes.password {
            Some(password) => Some(hash_password(password, self.bcrypt_cost).await?),
            None => None,
        };

        let patch = CustomerPatch {
            name: changes.name,
            email: changes.email,
            dob: changes.dob,
            password_hash,
        };

        if patch.is_empty() {
            return Ok(existing);
        }

        self.repository
            .update(id, patch)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes a customer together with its service tickets.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the customer does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<i64>) -> Result<(), AppError> {
        match self.repository.find_by_email(email).await? {
            Some(other) if Some(other.id) != owner => Err(AppError::conflict(
                conflict_message(Some(CUSTOMERS_EMAIL_KEY)),
                json!({ "email": email }),
            )),
            _ => Ok(()),
        }
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Customer not found.", json!({ "id": id }))
}
