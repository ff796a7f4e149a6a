use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an order.
///
/// Customer views and the admin console share this one enum. Moves between
/// states are checked with [`OrderStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// States reachable in one step from `self`.
    pub fn successors(&self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Pending => &[Confirmed, Processing, Cancelled],
            Confirmed => &[Processing, Cancelled],
            Processing => &[Shipped, Cancelled],
            Shipped => &[Delivered],
            Delivered | Cancelled => &[],
        }
    }

    /// Self-transitions are not moves and are rejected.
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        self.successors().contains(next)
    }

    pub fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

/// One purchased line within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl OrderItem {
    pub fn line_total(&self) -> u64 {
        self.price * u64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// A dated step in the order's history, e.g. "Order Placed" or "Shipped".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub status: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl TimelineEntry {
    pub fn new(status: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            status: status.into(),
            date: at.date(),
            time: at.time(),
        }
    }

    /// Time formatted as on the order page, e.g. "02:45 PM".
    pub fn display_time(&self) -> String {
        self.time.format("%I:%M %p").to_string()
    }
}

/// Money breakdown stored on an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAmounts {
    pub subtotal: u64,
    pub shipping: u64,
    pub tax: u64,
    pub discount: u64,
    pub total: u64,
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    #[serde(flatten)]
    pub amounts: OrderAmounts,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

/// Payload for placing a new order. The store assigns id and order number.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub items: Vec<OrderItem>,
    pub amounts: OrderAmounts,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub placed_at: NaiveDateTime,
}

/// Offset between numeric order ids and the public order-number sequence.
pub const ORDER_NUMBER_BASE: u64 = 1233;

/// `ORD-<year>-<sequence>` with a six digit, zero padded sequence.
pub fn order_number(year: i32, numeric_id: u64) -> String {
    format!("ORD-{}-{:06}", year, ORDER_NUMBER_BASE + numeric_id)
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn customer_name(&self) -> &str {
        &self.shipping_address.name
    }
}
