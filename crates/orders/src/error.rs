#[derive(Debug, thiserror::Error)]
pub enum ParseOrderStatusError {
    #[error("Invalid order status: '{0}'. Expected one of: Pending, Completed")]
    InvalidStatus(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseStatusFilterError {
    #[error("Invalid status filter: '{0}'. Expected one of: All, Pending, Completed")]
    InvalidFilter(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseSortKeyError {
    #[error("Invalid sort key: '{0}'. Expected one of: by_date, by_price")]
    InvalidSortKey(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseTimestampError {
    #[error("Unrecognized timestamp '{0}': expected an ISO 8601 date or date-time")]
    Unrecognized(String),
}
