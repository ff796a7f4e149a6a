//! Order history seed plus the read-side queries the admin console and the
//! account pages run over the order list.

pub mod seed;

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::domain::{Order, OrderStatus};

/// Admin order list filter. Both conditions must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSearch {
    pub query: String,
    pub status: Option<OrderStatus>,
}

impl OrderSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), status: None }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Blank query matches everything; otherwise a case-insensitive
    /// substring of the order number or the customer name.
    pub fn matches(&self, order: &Order) -> bool {
        let query = self.query.trim().to_lowercase();
        let text_ok = query.is_empty()
            || order.order_number.to_lowercase().contains(&query)
            || order.customer_name().to_lowercase().contains(&query);
        let status_ok = self.status.map_or(true, |status| order.status == status);
        text_ok && status_ok
    }

    pub fn apply(&self, orders: &[Order]) -> Vec<Order> {
        orders.iter().filter(|o| self.matches(o)).cloned().collect()
    }
}

/// Count of orders per status, in lifecycle order, zeroes included.
pub fn status_counts(orders: &[Order]) -> Vec<(OrderStatus, usize)> {
    OrderStatus::ALL
        .into_iter()
        .map(|status| (status, orders.iter().filter(|o| o.status == status).count()))
        .collect()
}

/// Newest first. Ties keep the higher order number first.
pub fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.order_number.cmp(&a.order_number))
    });
    orders
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProduct {
    pub product_id: String,
    pub name: String,
    pub units: u64,
    pub revenue: u64,
}

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub revenue: u64,
    pub order_count: usize,
    pub customer_count: usize,
    pub status_breakdown: Vec<(OrderStatus, usize)>,
    pub top_products: Vec<TopProduct>,
}

/// Cancelled orders count toward the order total and status breakdown but
/// not toward revenue or units sold.
pub fn dashboard(orders: &[Order], top: usize) -> Dashboard {
    let live = orders.iter().filter(|o| o.status != OrderStatus::Cancelled);

    let mut revenue = 0;
    let mut sold: HashMap<&str, TopProduct> = HashMap::new();
    for order in live {
        revenue += order.amounts.total;
        for item in &order.items {
            let entry = sold.entry(item.product_id.as_str()).or_insert_with(|| TopProduct {
                product_id: item.product_id.clone(),
                name: item.name.clone(),
                units: 0,
                revenue: 0,
            });
            entry.units += u64::from(item.quantity);
            entry.revenue += item.line_total();
        }
    }

    let mut top_products: Vec<TopProduct> = sold.into_values().collect();
    top_products.sort_by(|a, b| {
        b.units
            .cmp(&a.units)
            .then_with(|| b.revenue.cmp(&a.revenue))
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    top_products.truncate(top);

    let customers: BTreeSet<&str> = orders.iter().map(Order::customer_name).collect();

    Dashboard {
        revenue,
        order_count: orders.len(),
        customer_count: customers.len(),
        status_breakdown: status_counts(orders),
        top_products,
    }
}
