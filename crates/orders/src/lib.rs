//! Order domain for the order board: the order record, its status lifecycle,
//! the filter/sort derivation pipeline and the completion mutation.

pub mod error;
pub mod mutation;
pub mod order;
pub mod view;

#[cfg(test)]
pub mod test_utils;

pub use error::{
    ParseOrderStatusError, ParseSortKeyError, ParseStatusFilterError, ParseTimestampError,
};
pub use mutation::{Completion, complete_order};
pub use order::timestamp::parse_timestamp;
pub use order::{Order, OrderId, OrderStatus};
pub use view::{SortKey, StatusFilter, derive_view, filter_orders, sort_orders};
