//! Order history the storefront ships with.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::{
    order_number, Order, OrderAmounts, OrderItem, OrderStatus, ShippingAddress, TimelineEntry,
};

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap_or_default()
}

fn stamp(month: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
    day(month, d).and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default())
}

fn step(status: &str, month: u32, d: u32, hour: u32, minute: u32) -> TimelineEntry {
    TimelineEntry::new(status, stamp(month, d, hour, minute))
}

fn thumb(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?w=400&q=80")
}

fn item(product_id: &str, name: &str, photo: &str, quantity: u32, price: u64) -> OrderItem {
    OrderItem {
        product_id: product_id.to_string(),
        name: name.to_string(),
        image: thumb(photo),
        quantity,
        price,
        size: None,
        color: None,
    }
}

fn john_doe() -> ShippingAddress {
    ShippingAddress {
        name: "John Doe".into(),
        phone: "+91 98765 43210".into(),
        address: "123 Main Street, Apartment 4B".into(),
        city: "Mumbai".into(),
        state: "Maharashtra".into(),
        pincode: "400001".into(),
    }
}

pub fn orders() -> Vec<Order> {
    let delivered = Order {
        id: "1".into(),
        order_number: order_number(2024, 1),
        date: day(2, 10),
        status: OrderStatus::Delivered,
        items: vec![
            OrderItem {
                color: Some("Black".into()),
                ..item("1", "Premium Wireless Headphones", "photo-1505740420928-5e560c06d30e", 1, 8999)
            },
            OrderItem {
                color: Some("Silver".into()),
                ..item("7", "Stainless Steel Water Bottle", "photo-1602143407151-7111542de6e8", 2, 1299)
            },
        ],
        amounts: OrderAmounts { subtotal: 11597, shipping: 0, tax: 1391, discount: 500, total: 12488 },
        shipping_address: john_doe(),
        payment_method: "UPI".into(),
        tracking_number: Some("TRK123456789".into()),
        timeline: vec![
            step("Order Placed", 2, 10, 10, 30),
            step("Confirmed", 2, 10, 11, 15),
            step("Shipped", 2, 11, 9, 0),
            step("Out for Delivery", 2, 13, 8, 30),
            step("Delivered", 2, 13, 14, 45),
        ],
    };

    let shipped = Order {
        id: "2".into(),
        order_number: order_number(2024, 2),
        date: day(2, 14),
        status: OrderStatus::Shipped,
        items: vec![item("2", "Smart Fitness Watch", "photo-1523275335684-37898b6baf30", 1, 15999)],
        amounts: OrderAmounts { subtotal: 15999, shipping: 0, tax: 1920, discount: 0, total: 17919 },
        shipping_address: john_doe(),
        payment_method: "Credit Card".into(),
        tracking_number: Some("TRK987654321".into()),
        timeline: vec![
            step("Order Placed", 2, 14, 15, 20),
            step("Confirmed", 2, 14, 16, 0),
            step("Shipped", 2, 15, 10, 0),
        ],
    };

    let processing = Order {
        id: "3".into(),
        order_number: order_number(2024, 3),
        date: day(2, 15),
        status: OrderStatus::Processing,
        items: vec![OrderItem {
            size: Some("L".into()),
            color: Some("White".into()),
            ..item("4", "Organic Cotton T-Shirt", "photo-1521572163474-6864f9cf17ab", 3, 799)
        }],
        amounts: OrderAmounts { subtotal: 2397, shipping: 0, tax: 288, discount: 200, total: 2485 },
        shipping_address: john_doe(),
        payment_method: "UPI".into(),
        tracking_number: None,
        timeline: vec![step("Order Placed", 2, 15, 11, 30), step("Confirmed", 2, 15, 12, 0)],
    };

    vec![delivered, shipped, processing]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_numbers_and_subtotals_are_consistent() {
        for order in orders() {
            let subtotal: u64 = order.items.iter().map(OrderItem::line_total).sum();
            assert_eq!(subtotal, order.amounts.subtotal, "order {}", order.id);
        }
        assert_eq!(orders()[2].order_number, "ORD-2024-001236");
    }
}
