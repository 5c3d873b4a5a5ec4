//! Core domain entities of the repair shop.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Customer`] - A shop customer who owns service tickets
//! - [`Mechanic`] - A mechanic who can be assigned to tickets
//! - [`ServiceTicket`] - A service visit, with its assigned mechanics and parts
//! - [`Inventory`] - A part that can be used on tickets
//!
//! # Design Pattern
//!
//! Each entity has a `New*` struct for creation and a `*Patch` struct for
//! partial updates where `None` means "leave unchanged".

pub mod customer;
pub mod inventory;
pub mod mechanic;
pub mod service_ticket;

pub use customer::{Customer, CustomerPatch, NewCustomer};
pub use inventory::{Inventory, InventoryPatch, NewInventory};
pub use mechanic::{Mechanic, MechanicPatch, NewMechanic, RankedMechanic};
pub use service_ticket::{MechanicEdit, NewServiceTicket, ServiceTicket, ServiceTicketPatch};
