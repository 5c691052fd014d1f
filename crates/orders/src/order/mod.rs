use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

pub mod status;
pub mod timestamp;

pub use status::OrderStatus;

/// Order identifier as text.
///
/// Feeds carry ids either as JSON strings or integers; both normalize to the
/// same textual id so lookups from typed-in commands compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawOrderId {
            Text(String),
            Integer(i64),
        }

        Ok(match RawOrderId::deserialize(deserializer)? {
            RawOrderId::Text(text) => Self(text),
            RawOrderId::Integer(number) => Self(number.to_string()),
        })
    }
}

/// A single purchase record as published by the order feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    pub items: Vec<String>,
    #[serde(deserialize_with = "deserialize_total_price")]
    pub total_price: Decimal,
    pub status: OrderStatus,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Order {
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, OrderStatus::Pending)
    }

    /// Advances `Pending -> Completed`. Returns whether a transition happened.
    pub fn complete(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = OrderStatus::Completed;
        true
    }
}

fn deserialize_total_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let price = <Decimal as Deserialize>::deserialize(deserializer)?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(serde::de::Error::custom(format!(
            "totalPrice must be non-negative, got {price}"
        )));
    }
    Ok(price)
}
