//! Small helpers shared across layers.
//!
//! - [`db_error`] - Translation of database constraint names into API messages

pub mod db_error;
