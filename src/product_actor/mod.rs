//! Catalog records as store entities: admin create/edit/delete and stock actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
