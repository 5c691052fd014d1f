use tracing::trace;

use crate::{Order, OrderId, OrderStatus};

/// What marking an order as completed did to the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A pending order moved to `Completed`.
    Completed,
    /// The order exists but was already terminal.
    AlreadyCompleted,
    /// No order carries the given id.
    NotFound,
}

impl Completion {
    /// Classifies against every order carrying `id`, matching what
    /// [`complete_order`] will change.
    pub fn classify(orders: &[Order], id: &OrderId) -> Self {
        let mut matching = orders.iter().filter(|order| &order.id == id).peekable();
        if matching.peek().is_none() {
            Self::NotFound
        } else if matching.any(Order::is_pending) {
            Self::Completed
        } else {
            Self::AlreadyCompleted
        }
    }
}

/// Returns a copy of `orders` where every order with `id` is `Completed`.
///
/// Only the status field changes. An unknown id yields an element-wise equal
/// sequence; applying this twice is the same as applying it once.
pub fn complete_order(orders: &[Order], id: &OrderId) -> Vec<Order> {
    orders
        .iter()
        .map(|order| {
            let mut order = order.clone();
            if &order.id == id && order.complete() {
                trace!(order_id = %order.id, "Order transitioned to {}", OrderStatus::Completed);
            }
            order
        })
        .collect()
}
