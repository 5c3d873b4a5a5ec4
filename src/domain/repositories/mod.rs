//! Repository trait definitions for the domain layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`CustomerRepository`] - Customers and their tickets
//! - [`MechanicRepository`] - Mechanics and the ticket-count ranking
//! - [`ServiceTicketRepository`] - Tickets and both association tables
//! - [`InventoryRepository`] - Parts
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod customer_repository;
pub mod inventory_repository;
pub mod mechanic_repository;
pub mod service_ticket_repository;

pub use customer_repository::CustomerRepository;
pub use inventory_repository::InventoryRepository;
pub use mechanic_repository::MechanicRepository;
pub use service_ticket_repository::ServiceTicketRepository;

#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
#[cfg(test)]
pub use inventory_repository::MockInventoryRepository;
#[cfg(test)]
pub use mechanic_repository::MockMechanicRepository;
#[cfg(test)]
pub use service_ticket_repository::MockServiceTicketRepository;
