use board_orders::{Order, OrderId, OrderStatus, parse_timestamp};
use rust_decimal::Decimal;

/// Builds an order whose customer and items are derived from its id. Only the
/// fields the pipeline looks at are parameters.
pub fn order(id: &str, status: OrderStatus, total_price: Decimal, timestamp: &str) -> Order {
    Order {
        id: OrderId::from(id),
        customer: format!("Customer {id}"),
        items: vec![format!("Item {id}")],
        total_price,
        status,
        timestamp: parse_timestamp(timestamp).unwrap(),
    }
}

pub fn ids(orders: &[Order]) -> Vec<&str> {
    orders.iter().map(|order| order.id.0.as_str()).collect()
}
