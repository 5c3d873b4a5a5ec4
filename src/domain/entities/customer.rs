//! Domain entity representing a shop customer.

use chrono::NaiveDate;

/// A customer of the shop.
///
/// Owns service tickets; deleting a customer deletes its tickets. The password
/// is only ever held as a bcrypt hash.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub dob: Option<NaiveDate>,
    pub password_hash: String,
}

impl Customer {
    pub fn new(
        id: i64,
        name: String,
        email: String,
        dob: Option<NaiveDate>,
        password_hash: String,
    ) -> Self {
        Self {
            id,
            name,
            email,
            dob,
            password_hash,
        }
    }
}

/// Input data for creating a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub dob: Option<NaiveDate>,
    pub password_hash: String,
}

/// Partial update of a customer.
///
/// `dob: Some(None)` clears the date of birth, `dob: None` keeps it.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<Option<NaiveDate>>,
    pub password_hash: Option<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.dob.is_none()
            && self.password_hash.is_none()
    }
}
