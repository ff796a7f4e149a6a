use chrono::Datelike;
use tracing::info;

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::actor_framework::Entity;
use crate::domain::{order_number, Order, OrderCreate, OrderStatus, TimelineEntry};

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = (); // Orders change only through actions
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order from a checkout.
    ///
    /// # Notes
    /// The order starts `Pending` with an "Order Placed" timeline entry. The
    /// order number is derived from the numeric id and the year placed.
    fn from_create(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError("Order has no items".into()));
        }
        let numeric_id: u64 = id
            .parse()
            .map_err(|_| OrderError::ValidationError(format!("Non-numeric order id: {id}")))?;
        Ok(Self {
            order_number: order_number(params.placed_at.year(), numeric_id),
            id,
            date: params.placed_at.date(),
            status: OrderStatus::Pending,
            items: params.items,
            amounts: params.amounts,
            shipping_address: params.shipping_address,
            payment_method: params.payment_method,
            tracking_number: None,
            timeline: vec![TimelineEntry::new("Order Placed", params.placed_at)],
        })
    }

    /// Orders change only through [`OrderAction`]s, so a plain update is refused.
    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Err(OrderError::ValidationError(
            "Orders change only through status and tracking actions".into(),
        ))
    }

    /// Handles fulfilment actions.
    ///
    /// # Errors
    /// - `InvalidTransition` when the lifecycle forbids the move.
    /// - `ValidationError` for a blank tracking number.
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::SetStatus { status, at } => {
                let from = self.status;
                if !from.can_transition_to(&status) {
                    return Err(OrderError::InvalidTransition { from, to: status });
                }
                self.status = status;
                self.timeline.push(TimelineEntry::new(status.as_str(), at));
                info!(order_number = %self.order_number, %from, to = %status, "Order status changed");
                Ok(OrderActionResult::SetStatus { from, to: status })
            }
            OrderAction::AddTracking(number) => {
                let number = number.trim();
                if number.is_empty() {
                    return Err(OrderError::ValidationError(
                        "Please enter a tracking number".into(),
                    ));
                }
                self.tracking_number = Some(number.to_string());
                Ok(OrderActionResult::AddTracking(number.to_string()))
            }
        }
    }
}
