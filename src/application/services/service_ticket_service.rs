//! Service tickets and their mechanic/part associations.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{MechanicEdit, NewServiceTicket, ServiceTicket, ServiceTicketPatch};
use crate::domain::repositories::{
    CustomerRepository, InventoryRepository, MechanicRepository, ServiceTicketRepository,
};
use crate::error::AppError;

/// Service for tickets and their associations.
///
/// Single-item association operations check that both the ticket and the
/// referenced mechanic or part exist, then delegate to idempotent repository
/// operations. Bulk edits skip unknown mechanics.
pub struct ServiceTicketService<T, C, M, I>
where
    T: ServiceTicketRepository,
    C: CustomerRepository,
    M: MechanicRepository,
    I: InventoryRepository,
{
    ticket_repository: Arc<T>,
    customer_repository: Arc<C>,
    mechanic_repository: Arc<M>,
    inventory_repository: Arc<I>,
}

impl<T, C, M, I> ServiceTicketService<T, C, M, I>
where
    T: ServiceTicketRepository,
    C: CustomerRepository,
    M: MechanicRepository,
    I: InventoryRepository,
{
    pub fn new(
        ticket_repository: Arc<T>,
        customer_repository: Arc<C>,
        mechanic_repository: Arc<M>,
        inventory_repository: Arc<I>,
    ) -> Self {
        Self {
            ticket_repository,
            customer_repository,
            mechanic_repository,
            inventory_repository,
        }
    }

    /// Opens a ticket for an existing customer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] (not `NotFound`) if the customer does
    /// not exist.
    pub async fn create(&self, new_ticket: NewServiceTicket) -> Result<ServiceTicket, AppError> {
        self.ensure_customer(new_ticket.customer_id).await?;

        let ticket = self.ticket_repository.create(new_ticket).await?;
        info!(
            ticket_id = ticket.id,
            customer_id = ticket.customer_id,
            "Service ticket created"
        );
        Ok(ticket)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no ticket has that id.
    pub async fn get(&self, id: i64) -> Result<ServiceTicket, AppError> {
        self.ticket_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ticket_not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<ServiceTicket>, AppError> {
        self.ticket_repository.list().await
    }

    /// Tickets owned by one customer.
    pub async fn list_for_customer(
        &self,
        customer_id: i64,
    ) -> Result<Vec<ServiceTicket>, AppError> {
        self.ticket_repository.list_by_customer(customer_id).await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the ticket does not exist.
    /// Returns [`AppError::BadRequest`] if a new `customer_id` references no customer.
    pub async fn update(
        &self,
        id: i64,
        patch: ServiceTicketPatch,
    ) -> Result<ServiceTicket, AppError> {
        let existing = self.get(id).await?;

        if let Some(customer_id) = patch.customer_id
            && customer_id != existing.customer_id
        {
            self.ensure_customer(customer_id).await?;
        }

        self.ticket_repository
            .update(id, patch)
            .await?
            .ok_or_else(|| ticket_not_found(id))
    }

    /// Deletes a ticket. Its mechanics and parts are detached, not deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the ticket does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.ticket_repository.delete(id).await? {
            return Err(ticket_not_found(id));
        }

        info!(ticket_id = id, "Service ticket deleted");
        Ok(())
    }

    /// Assigns a mechanic. Assigning twice leaves one association.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the ticket or the mechanic does not exist.
    pub async fn assign_mechanic(
        &self,
        ticket_id: i64,
        mechanic_id: i64,
    ) -> Result<ServiceTicket, AppError> {
        let ticket = self.get(ticket_id).await?;
        self.ensure_mechanic(mechanic_id).await?;

        if ticket.has_mechanic(mechanic_id) {
            return Ok(ticket);
        }

        self.ticket_repository
            .add_mechanic(ticket_id, mechanic_id)
            .await?;
        self.get(ticket_id).await
    }

    /// Removes a mechanic. Removing one that is not assigned is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the ticket or the mechanic does not exist.
    pub async fn remove_mechanic(
        &self,
        ticket_id: i64,
        mechanic_id: i64,
    ) -> Result<ServiceTicket, AppError> {
        let ticket = self.get(ticket_id).await?;
        self.ensure_mechanic(mechanic_id).await?;

        if !ticket.has_mechanic(mechanic_id) {
            return Ok(ticket);
        }

        self.ticket_repository
            .remove_mechanic(ticket_id, mechanic_id)
            .await?;
        self.get(ticket_id).await
    }

    /// Adds and removes mechanics in one step.
    ///
    /// Adds are applied before removes, so an id in both lists ends up removed.
    /// Ids that match no mechanic are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the ticket does not exist.
    pub async fn edit_mechanics(
        &self,
        ticket_id: i64,
        edit: MechanicEdit,
    ) -> Result<ServiceTicket, AppError> {
        self.get(ticket_id).await?;

        if !edit.add_ids.is_empty() || !edit.remove_ids.is_empty() {
            self.ticket_repository
                .edit_mechanics(ticket_id, edit)
                .await?;
        }

        self.get(ticket_id).await
    }

    /// Attaches a part. Adding it twice leaves one association.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the ticket or the part does not exist.
    pub async fn add_part(
        &self,
        ticket_id: i64,
        inventory_id: i64,
    ) -> Result<ServiceTicket, AppError> {
        let ticket = self.get(ticket_id).await?;
        self.ensure_part(inventory_id).await?;

        if ticket.has_part(inventory_id) {
            return Ok(ticket);
        }

        self.ticket_repository
            .add_part(ticket_id, inventory_id)
            .await?;
        self.get(ticket_id).await
    }

    /// Detaches a part. Detaching one that is not attached is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the ticket or the part does not exist.
    pub async fn remove_part(
        &self,
        ticket_id: i64,
        inventory_id: i64,
    ) -> Result<ServiceTicket, AppError> {
        let ticket = self.get(ticket_id).await?;
        self.ensure_part(inventory_id).await?;

        if !ticket.has_part(inventory_id) {
            return Ok(ticket);
        }

        self.ticket_repository
            .remove_part(ticket_id, inventory_id)
            .await?;
        self.get(ticket_id).await
    }

    async fn ensure_customer(&self, customer_id: i64) -> Result<(), AppError> {
        if self
            .customer_repository
            .find_by_id(customer_id)
            .await?
            .is_none()
        {
            return Err(AppError::bad_request(
                format!("Customer with id {} not found", customer_id),
                json!({ "customer_id": customer_id }),
            ));
        }
        Ok(())
    }

    async fn ensure_mechanic(&self, mechanic_id: i64) -> Result<(), AppError> {
        if self
            .mechanic_repository
            .find_by_id(mechanic_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(
                "Mechanic not found",
                json!({ "id": mechanic_id }),
            ));
        }
        Ok(())
    }

    async fn ensure_part(&self, inventory_id: i64) -> Result<(), AppError> {
        if self
            .inventory_repository
            .find_by_id(inventory_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(
                "Inventory item not found",
                json!({ "id": inventory_id }),
            ));
        }
        Ok(())
    }
}

fn ticket_not_found(id: i64) -> AppError {
    AppError::not_found("Ticket not found", json!({ "id": id }))
}
