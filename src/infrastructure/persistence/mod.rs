//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Rows are
//! decoded through private `FromRow` structs and converted into domain
//! entities, so the domain layer never depends on SQLx.
//!
//! # Repositories
//!
//! - [`PgCustomerRepository`] - Customer storage and pagination
//! - [`PgMechanicRepository`] - Mechanic storage and ticket ranking
//! - [`PgServiceTicketRepository`] - Tickets and their association tables
//! - [`PgInventoryRepository`] - Part storage

pub mod pg_customer_repository;
pub mod pg_inventory_repository;
pub mod pg_mechanic_repository;
pub mod pg_service_ticket_repository;

pub use pg_customer_repository::PgCustomerRepository;
pub use pg_inventory_repository::PgInventoryRepository;
pub use pg_mechanic_repository::PgMechanicRepository;
pub use pg_service_ticket_repository::PgServiceTicketRepository;
