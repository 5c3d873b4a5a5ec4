//! Repository trait for service tickets and their associations.

use crate::domain::entities::{MechanicEdit, NewServiceTicket, ServiceTicket, ServiceTicketPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for service tickets.
///
/// Association operations are idempotent: adding an existing member or
/// removing a missing one leaves the tables unchanged. Membership uniqueness
/// is enforced by the join tables' primary keys.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgServiceTicketRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceTicketRepository: Send + Sync {
    /// Creates a ticket with no mechanics or parts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the customer does not exist.
    async fn create(&self, new_ticket: NewServiceTicket) -> Result<ServiceTicket, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ServiceTicket>, AppError>;

    /// Lists all tickets ordered by id.
    async fn list(&self) -> Result<Vec<ServiceTicket>, AppError>;

    /// Lists the tickets owned by one customer, ordered by id.
    async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<ServiceTicket>, AppError>;

    /// Applies a partial update. Returns `None` if the ticket does not exist.
    async fn update(
        &self,
        id: i64,
        patch: ServiceTicketPatch,
    ) -> Result<Option<ServiceTicket>, AppError>;

    /// Deletes a ticket and detaches its mechanics and parts.
    ///
    /// Returns `Ok(false)` if no ticket had that id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Inserts the ticket/mechanic pair unless it already exists.
    async fn add_mechanic(&self, ticket_id: i64, mechanic_id: i64) -> Result<(), AppError>;

    /// Removes the ticket/mechanic pair if present.
    async fn remove_mechanic(&self, ticket_id: i64, mechanic_id: i64) -> Result<(), AppError>;

    /// Applies a bulk mechanic edit in one transaction.
    ///
    /// Ids in `add_ids` that reference no mechanic are skipped.
    async fn edit_mechanics(&self, ticket_id: i64, edit: MechanicEdit) -> Result<(), AppError>;

    /// Inserts the ticket/part pair unless it already exists.
    async fn add_part(&self, ticket_id: i64, inventory_id: i64) -> Result<(), AppError>;

    /// Removes the ticket/part pair if present.
    async fn remove_part(&self, ticket_id: i64, inventory_id: i64) -> Result<(), AppError>;
}
