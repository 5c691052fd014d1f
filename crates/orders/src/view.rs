//! Derivation pipeline: the filter-then-sort projection shown by the board.
//!
//! Everything here is pure. Inputs are never mutated; each step returns a
//! fresh sequence.

use crate::error::{ParseSortKeyError, ParseStatusFilterError};
use crate::{Order, OrderStatus};

/// Which statuses the board shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub const OPTIONS: [Self; 3] = [Self::All, Self::Pending, Self::Completed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    pub const fn matches(self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => matches!(status, OrderStatus::Pending),
            Self::Completed => matches!(status, OrderStatus::Completed),
        }
    }
}

impl From<OrderStatus> for StatusFilter {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => Self::Pending,
            OrderStatus::Completed => Self::Completed,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = ParseStatusFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(Self::All),
            "Pending" => Ok(Self::Pending),
            "Completed" => Ok(Self::Completed),
            _ => Err(ParseStatusFilterError::InvalidFilter(s.to_string())),
        }
    }
}

/// Ordering applied after filtering. Always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    ByDate,
    ByPrice,
}

impl SortKey {
    pub const OPTIONS: [Self; 2] = [Self::ByDate, Self::ByPrice];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ByDate => "by_date",
            Self::ByPrice => "by_price",
        }
    }

    /// Human-facing label for the sort control.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ByDate => "Sort by Date",
            Self::ByPrice => "Sort by Price",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "by_date" => Ok(Self::ByDate),
            "by_price" => Ok(Self::ByPrice),
            _ => Err(ParseSortKeyError::InvalidSortKey(s.to_string())),
        }
    }
}

pub fn filter_orders(orders: &[Order], filter: StatusFilter) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| filter.matches(order.status))
        .cloned()
        .collect()
}

/// Stable ascending sort; equal keys keep their input order.
pub fn sort_orders(orders: &[Order], key: SortKey) -> Vec<Order> {
    let mut sorted = orders.to_vec();
    match key {
        SortKey::ByDate => sorted.sort_by_key(|order| order.timestamp),
        SortKey::ByPrice => sorted.sort_by_key(|order| order.total_price),
    }
    sorted
}

pub fn derive_view(orders: &[Order], filter: StatusFilter, key: SortKey) -> Vec<Order> {
    sort_orders(&filter_orders(orders, filter), key)
}
