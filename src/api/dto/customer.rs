//! DTOs for customer endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::limits::{fits_email, fits_text};

use crate::application::services::{CustomerChanges, CustomerPage, CustomerRegistration};
use crate::domain::entities::Customer;
use crate::error::AppError;

/// Request body for `POST /customers`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, message = "Shorter than minimum length 1."),
        custom(function = "fits_text")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Missing data for required field."),
        email(message = "Not a valid email address."),
        custom(function = "fits_email")
    )]
    pub email: Option<String>,

    pub dob: Option<NaiveDate>,

    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, message = "Shorter than minimum length 1.")
    )]
    pub password: Option<String>,
}

impl CreateCustomerRequest {
    /// Validates the payload and converts it into a registration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with one entry per invalid field.
    pub fn validated(self) -> Result<CustomerRegistration, AppError> {
        self.validate()?;

        // presence checked by `validate`
        Ok(CustomerRegistration {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            dob: self.dob,
            password: self.password.unwrap_or_default(),
        })
    }
}

/// Request body for `PUT /customers/{id}`.
///
/// Only provided fields are changed.
///
/// # `dob` semantics
///
/// - **Absent** → leave existing value unchanged
/// - **`null`** → clear the date of birth
/// - **Date** → set new date of birth
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(
        length(min = 1, message = "Shorter than minimum length 1."),
        custom(function = "fits_text")
    )]
    pub name: Option<String>,

    #[validate(
        email(message = "Not a valid email address."),
        custom(function = "fits_email")
    )]
    pub email: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub dob: Option<Option<NaiveDate>>,

    #[validate(length(min = 1, message = "Shorter than minimum length 1."))]
    pub password: Option<String>,
}

impl UpdateCustomerRequest {
    pub fn validated(self) -> Result<CustomerChanges, AppError> {
        self.validate()?;

        Ok(CustomerChanges {
            name: self.name,
            email: self.email,
            dob: self.dob,
            password: self.password,
        })
    }
}

/// Public view of a customer. The password hash is never serialized.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub dob: Option<NaiveDate>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            dob: customer.dob,
        }
    }
}

/// Response for `GET /customers`.
#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerResponse>,
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
    pub per_page: i64,
}

impl From<CustomerPage> for CustomerListResponse {
    fn from(page: CustomerPage) -> Self {
        Self {
            customers: page.customers.into_iter().map(Into::into).collect(),
            total: page.total,
            pages: page.pages,
            current_page: page.page,
            per_page: page.per_page,
        }
    }
}
