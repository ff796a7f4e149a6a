use chrono::NaiveDateTime;

use crate::domain::OrderStatus;

/// Fulfilment actions available in the admin console.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order to `status` if the lifecycle allows it, stamping the
    /// timeline with `at`.
    SetStatus { status: OrderStatus, at: NaiveDateTime },
    /// Records the carrier's tracking number.
    AddTracking(String),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderActionResult {
    SetStatus { from: OrderStatus, to: OrderStatus },
    AddTracking(String),
}
