//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource.

pub mod customers;
pub mod health;
pub mod index;
pub mod inventory;
pub mod mechanics;
pub mod service_tickets;

pub use customers::{
    create_customer_handler, delete_customer_handler, get_customer_handler,
    list_customers_handler, login_handler, my_tickets_handler, update_customer_handler,
};
pub use health::health_handler;
pub use index::{index_handler, not_found_handler};
pub use inventory::{
    create_inventory_handler, delete_inventory_handler, get_inventory_handler,
    list_inventory_handler, update_inventory_handler,
};
pub use mechanics::{
    create_mechanic_handler, delete_mechanic_handler, get_mechanic_handler,
    list_mechanics_handler, mechanic_ranking_handler, update_mechanic_handler,
};
pub use service_tickets::{
    add_part_handler, assign_mechanic_handler, create_ticket_handler, delete_ticket_handler,
    edit_mechanics_handler, get_ticket_handler, list_tickets_handler, remove_mechanic_handler,
    remove_part_handler, update_ticket_handler,
};
