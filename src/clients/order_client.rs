use chrono::NaiveDateTime;
use tracing::{debug, error, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::clients::ProductClient;
use crate::domain::{Order, OrderCreate, OrderStatus};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};

/// Client for the order store.
///
/// Placing an order checks every line against the catalog before the
/// order is created.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    product_client: ProductClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    /// Validates the lines and creates the order; returns the new order id.
    ///
    /// # Errors
    /// - `InvalidProduct` when a line names a product the catalog lacks.
    /// - `OutOfStock` when a line's product is currently unavailable.
    #[instrument(skip(self, order), fields(lines = order.items.len()))]
    pub async fn place_order(&self, order: OrderCreate) -> Result<String, OrderError> {
        info!("Processing place_order request");

        for item in &order.items {
            match self.product_client.get_product(item.product_id.clone()).await {
                Ok(Some(product)) if product.in_stock => {
                    debug!(product_name = %product.name, "Product validation successful");
                }
                Ok(Some(product)) => {
                    error!(product_name = %product.name, "Product out of stock");
                    return Err(OrderError::OutOfStock(product.name));
                }
                Ok(None) => {
                    error!(product_id = %item.product_id, "Product not found");
                    return Err(OrderError::InvalidProduct(item.product_id.clone()));
                }
                Err(e) => {
                    error!(error = %e, "Product validation failed");
                    return Err(OrderError::InvalidProduct(format!(
                        "Product validation failed: {}",
                        e
                    )));
                }
            }
        }

        let id = self.inner.create(order).await.map_err(OrderError::from)?;
        info!(order_id = %id, "Order placed");
        Ok(id)
    }

    /// Moves an order along its lifecycle. Returns the previous status.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: String,
        status: OrderStatus,
        at: NaiveDateTime,
    ) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        match self.inner.perform_action(id, OrderAction::SetStatus { status, at }).await {
            Ok(OrderActionResult::SetStatus { from, .. }) => Ok(from),
            Ok(_) => Err(OrderError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_tracking(&self, id: String, number: String) -> Result<String, OrderError> {
        debug!("Sending request");
        match self.inner.perform_action(id, OrderAction::AddTracking(number)).await {
            Ok(OrderActionResult::AddTracking(number)) => Ok(number),
            Ok(_) => Err(OrderError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order);
