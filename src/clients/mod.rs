use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::cart::{CartError, CartSnapshot};
use crate::domain::{CartItem, Product};
use crate::messages::CartRequest;

#[macro_use]
mod macros;
mod order_client;
mod product_client;

pub use order_client::OrderClient;
pub use product_client::ProductClient;

// =============================================================================
// Macro for hand-written service clients
// =============================================================================

macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

// =============================================================================
// Cart Client
// =============================================================================

/// Handle to the cart service. Cheap to clone; all clones share one cart.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    /// Asks the service to stop. A service that is already gone is fine.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(CartRequest::Shutdown).await;
    }
}

client_method!(CartClient => fn add_to_cart(product: Product, quantity: u32, size: Option<String>, color: Option<String>) -> CartItem as CartRequest::AddToCart, Error = CartError);
client_method!(CartClient => fn remove_from_cart(line_id: String) -> bool as CartRequest::RemoveFromCart, Error = CartError);
client_method!(CartClient => fn update_quantity(line_id: String, quantity: u32) -> bool as CartRequest::UpdateQuantity, Error = CartError);
client_method!(CartClient => fn clear_cart() -> () as CartRequest::ClearCart, Error = CartError);
client_method!(CartClient => fn snapshot() -> CartSnapshot as CartRequest::Snapshot, Error = CartError);
