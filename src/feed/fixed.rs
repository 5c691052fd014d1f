use async_trait::async_trait;
use board_orders::Order;
use std::time::Duration;
use tracing::warn;

use super::{FetchError, OrderFeed};

/// In-memory feed for demos and tests. Either always yields the same orders
/// or always fails with the same message, optionally after a delay.
#[derive(Debug, Clone)]
pub struct StaticFeed {
    orders: Vec<Order>,
    failure_message: Option<String>,
    delay: Option<Duration>,
}

impl StaticFeed {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders,
            failure_message: None,
            delay: None,
        }
    }

    pub fn with_failure(message: impl Into<String>) -> Self {
        Self {
            orders: Vec::new(),
            failure_message: Some(message.into()),
            delay: None,
        }
    }

    /// Resolves only after `delay`, like a slow network source.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl OrderFeed for StaticFeed {
    async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure_message {
            warn!("[STATIC] Simulating feed failure: {message}");
            return Err(FetchError::Unavailable(message.clone()));
        }
        Ok(self.orders.clone())
    }

    fn describe(&self) -> String {
        format!("static feed ({} orders)", self.orders.len())
    }
}
