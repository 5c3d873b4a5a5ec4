//! DTOs for service ticket endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{MechanicEdit, NewServiceTicket, ServiceTicket, ServiceTicketPatch};
use crate::error::AppError;

/// Request body for `POST /service-tickets`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceTicketRequest {
    #[validate(required(message = "Missing data for required field."))]
    pub service_date: Option<NaiveDate>,

    #[validate(required(message = "Missing data for required field."))]
    pub customer_id: Option<i64>,
}

impl CreateServiceTicketRequest {
    pub fn validated(self) -> Result<NewServiceTicket, AppError> {
        self.validate()?;

        Ok(NewServiceTicket {
            service_date: self.service_date.unwrap_or_default(),
            customer_id: self.customer_id.unwrap_or_default(),
        })
    }
}

/// Request body for `PUT /service-tickets/{id}`. Only provided fields are changed.
#[derive(Debug, Deserialize)]
pub struct UpdateServiceTicketRequest {
    pub service_date: Option<NaiveDate>,
    pub customer_id: Option<i64>,
}

impl From<UpdateServiceTicketRequest> for ServiceTicketPatch {
    fn from(req: UpdateServiceTicketRequest) -> Self {
        Self {
            service_date: req.service_date,
            customer_id: req.customer_id,
        }
    }
}

/// Request body for `PUT /service-tickets/{id}/edit`.
#[derive(Debug, Default, Deserialize)]
pub struct EditMechanicsRequest {
    #[serde(default)]
    pub add_ids: Vec<i64>,
    #[serde(default)]
    pub remove_ids: Vec<i64>,
}

impl From<EditMechanicsRequest> for MechanicEdit {
    fn from(req: EditMechanicsRequest) -> Self {
        Self {
            add_ids: req.add_ids,
            remove_ids: req.remove_ids,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceTicketResponse {
    pub id: i64,
    pub service_date: NaiveDate,
    pub customer_id: i64,
    pub mechanic_ids: Vec<i64>,
    pub inventory_ids: Vec<i64>,
}

impl From<ServiceTicket> for ServiceTicketResponse {
    fn from(ticket: ServiceTicket) -> Self {
        Self {
            id: ticket.id,
            service_date: ticket.service_date,
            customer_id: ticket.customer_id,
            mechanic_ids: ticket.mechanic_ids,
            inventory_ids: ticket.inventory_ids,
        }
    }
}
