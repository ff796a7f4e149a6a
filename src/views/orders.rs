use serde::Serialize;

use super::NotFound;
use crate::domain::{Order, OrderItem, OrderStatus};
use crate::orders::newest_first;

/// Item thumbnails shown on an order card before the "+N" overflow badge.
pub const PREVIEW_ITEMS: usize = 4;

/// Recent orders listed on the account page.
pub const RECENT_ORDERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderCard {
    pub id: String,
    pub order_number: String,
    pub date: String,
    pub status: OrderStatus,
    pub total: u64,
    pub previews: Vec<OrderItem>,
    /// Items beyond the previews, 0 when all fit.
    pub overflow: usize,
    pub link: String,
}

impl OrderCard {
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            order_number: order.order_number.clone(),
            date: order.date.format("%b %-d, %Y").to_string(),
            status: order.status,
            total: order.amounts.total,
            previews: order.items.iter().take(PREVIEW_ITEMS).cloned().collect(),
            overflow: order.items.len().saturating_sub(PREVIEW_ITEMS),
            link: format!("/orders/{}", order.id),
        }
    }
}

/// Order history, newest first.
pub fn order_history(orders: &[Order]) -> Vec<OrderCard> {
    newest_first(orders.to_vec()).iter().map(OrderCard::from_order).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub status: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetailView {
    pub order: Order,
    pub timeline: Vec<TimelineStep>,
    pub item_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OrderPage {
    Found(Box<OrderDetailView>),
    NotFound(NotFound),
}

pub const ORDER_NOT_FOUND: NotFound = NotFound {
    title: "Order not found",
    back_link: "/orders",
    back_label: "Back to Orders",
};

pub fn order_page(id: &str, orders: &[Order]) -> OrderPage {
    match orders.iter().find(|o| o.id == id) {
        Some(order) => OrderPage::Found(Box::new(OrderDetailView {
            timeline: order
                .timeline
                .iter()
                .map(|entry| TimelineStep {
                    status: entry.status.clone(),
                    date: entry.date.format("%b %-d, %Y").to_string(),
                    time: entry.display_time(),
                })
                .collect(),
            item_count: order.item_count(),
            order: order.clone(),
        })),
        None => OrderPage::NotFound(ORDER_NOT_FOUND),
    }
}

/// Figures and recent orders for the account overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub total_orders: usize,
    /// Orders not yet delivered or cancelled.
    pub open_orders: usize,
    /// Sum of totals over orders that were not cancelled.
    pub total_spent: u64,
    pub recent: Vec<OrderCard>,
}

pub fn account_summary(orders: &[Order]) -> AccountSummary {
    let mut recent = order_history(orders);
    recent.truncate(RECENT_ORDERS);
    AccountSummary {
        total_orders: orders.len(),
        open_orders: orders.iter().filter(|o| !o.status.is_terminal()).count(),
        total_spent: orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .map(|o| o.amounts.total)
            .sum(),
        recent,
    }
}
