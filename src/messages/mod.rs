use tokio::sync::oneshot;

use crate::cart::{CartError, CartSnapshot};
use crate::domain::{CartItem, Product};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Messages served by the cart service. Each variant carries its parameters
/// and a oneshot channel for the reply.
#[derive(Debug)]
pub enum CartRequest {
    AddToCart {
        product: Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
        respond_to: ServiceResponse<CartItem, CartError>,
    },
    RemoveFromCart {
        line_id: String,
        respond_to: ServiceResponse<bool, CartError>,
    },
    UpdateQuantity {
        line_id: String,
        quantity: u32,
        respond_to: ServiceResponse<bool, CartError>,
    },
    ClearCart {
        respond_to: ServiceResponse<(), CartError>,
    },
    Snapshot {
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    Shutdown,
}
