//! Shopping cart: the state container, its storage slots and price summary.

pub mod pricing;
pub mod state;
pub mod storage;

pub use pricing::*;
pub use state::*;
pub use storage::*;

use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Invalid coupon code")]
    InvalidCoupon(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
