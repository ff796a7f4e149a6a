use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::cart::{Cart, CartError, CartSnapshot};
use crate::clients::CartClient;
use crate::domain::{CartItem, Product};
use crate::messages::{CartRequest, ServiceResponse};

// =============================================================================
// CART SERVICE
// =============================================================================

/// Owns the [`Cart`] and applies requests one at a time, so every mutation
/// and its storage write happen in order.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
}

impl CartService {
    pub fn new(buffer_size: usize, cart: Cart) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, cart };
        let client = CartClient::new(sender);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(lines = self.cart.items().len(), "CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddToCart { product, quantity, size, color, respond_to } => {
                    self.handle_add(product, quantity, size, color, respond_to);
                }
                CartRequest::RemoveFromCart { line_id, respond_to } => {
                    let removed = self.cart.remove_from_cart(&line_id);
                    debug!(%line_id, removed, "Processed remove_from_cart");
                    let _ = respond_to.send(Ok(removed));
                }
                CartRequest::UpdateQuantity { line_id, quantity, respond_to } => {
                    let changed = self.cart.update_quantity(&line_id, quantity);
                    debug!(%line_id, quantity, changed, "Processed update_quantity");
                    let _ = respond_to.send(Ok(changed));
                }
                CartRequest::ClearCart { respond_to } => {
                    self.cart.clear_cart();
                    info!("Cart cleared");
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::Snapshot { respond_to } => {
                    self.handle_snapshot(respond_to);
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }
        info!("CartService stopped");
    }

    #[instrument(fields(product_id = %product.id), skip(self, product, respond_to))]
    fn handle_add(
        &mut self,
        product: Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
        respond_to: ServiceResponse<CartItem, CartError>,
    ) {
        let result = self.cart.add_to_cart(&product, quantity, size, color);
        match &result {
            Ok(line) => info!(line_id = %line.id, quantity = line.quantity, "Added to cart"),
            Err(e) => warn!(error = %e, "Add to cart rejected"),
        }
        let _ = respond_to.send(result);
    }

    fn handle_snapshot(&self, respond_to: ServiceResponse<CartSnapshot, CartError>) {
        let snapshot = self.cart.snapshot();
        debug!(count = snapshot.count, total = snapshot.total, "Cart snapshot");
        let _ = respond_to.send(Ok(snapshot));
    }
}
