use rust_decimal::Decimal;

use crate::order::timestamp::parse_timestamp;
use crate::{Order, OrderId, OrderStatus};

pub fn order_with(id: &str, status: OrderStatus, total_price: Decimal, timestamp: &str) -> Order {
    Order {
        id: OrderId::from(id),
        customer: format!("Customer {id}"),
        items: vec![format!("Item {id}")],
        total_price,
        status,
        timestamp: parse_timestamp(timestamp).unwrap(),
    }
}

pub fn pending_order(id: &str, total_price: Decimal, timestamp: &str) -> Order {
    order_with(id, OrderStatus::Pending, total_price, timestamp)
}

pub fn completed_order(id: &str, total_price: Decimal, timestamp: &str) -> Order {
    order_with(id, OrderStatus::Completed, total_price, timestamp)
}

pub fn ids(orders: &[Order]) -> Vec<&str> {
    orders.iter().map(|order| order.id.0.as_str()).collect()
}
