//! Orders as store entities: placement and the admin fulfilment actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
