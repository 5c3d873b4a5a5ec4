//! Business logic services for the application layer.

pub mod auth_service;
pub mod customer_service;
pub mod inventory_service;
pub mod mechanic_service;
pub mod password;
pub mod service_ticket_service;

pub use auth_service::{AuthError, AuthService};
pub use customer_service::{CustomerChanges, CustomerPage, CustomerRegistration, CustomerService};
pub use inventory_service::InventoryService;
pub use mechanic_service::MechanicService;
pub use service_ticket_service::ServiceTicketService;
