use serde::{Deserialize, Serialize};

use crate::error::ParseOrderStatusError;

/// Order status lifecycle.
///
/// An order moves one way only:
/// - `Pending`: placed and waiting to be handled, the board offers the completion action
/// - `Completed`: terminal, no transition back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl OrderStatus {
    pub const ALL: [Self; 2] = [Self::Pending, Self::Completed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Completed" => Ok(Self::Completed),
            _ => Err(ParseOrderStatusError::InvalidStatus(s.to_string())),
        }
    }
}
