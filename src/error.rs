use thiserror::Error;

use crate::cart::CartError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::views::checkout::CheckoutError;

/// Errors surfaced by the system coordinator when rendering a page or
/// shutting down.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorefrontError {
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
