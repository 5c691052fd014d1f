use board_orders::{SortKey, StatusFilter};
use clap::Parser;
use tracing::Level;

use crate::feed::FeedSource;

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

impl From<&LogLevel> for Level {
    fn from(log_level: &LogLevel) -> Self {
        (*log_level).into()
    }
}

#[derive(Parser, Debug, Clone)]
pub struct Env {
    /// Order feed: an http(s) URL or a path to a JSON file
    #[clap(long, env = "ORDERS_SOURCE", default_value = "mockOrders.json")]
    pub source: FeedSource,
    /// Initial status filter (All, Pending, Completed)
    #[clap(long, env = "ORDERS_FILTER", default_value = "All")]
    pub filter: StatusFilter,
    /// Initial sort key (by_date, by_price)
    #[clap(long, env = "ORDERS_SORT", default_value = "by_date")]
    pub sort: SortKey,
    #[clap(long, env, default_value = "info")]
    pub log_level: LogLevel,
}

pub fn setup_tracing(log_level: LogLevel) {
    let level: Level = log_level.into();
    let default_filter = format!("order_board={level},board_orders={level}");

    // Board output owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub fn create_test_env(source: FeedSource) -> Env {
        Env {
            source,
            filter: StatusFilter::All,
            sort: SortKey::ByDate,
            log_level: LogLevel::Debug,
        }
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
        assert_eq!(Level::from(&LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }

    #[test]
    fn test_env_parses_flags() {
        let env = Env::try_parse_from([
            "order-board",
            "--source",
            "https://shop.example.com/mockOrders.json",
            "--filter",
            "Pending",
            "--sort",
            "by_price",
            "--log-level",
            "warn",
        ])
        .unwrap();

        assert!(matches!(env.source, FeedSource::Http(ref url) if url.path() == "/mockOrders.json"));
        assert_eq!(env.filter, StatusFilter::Pending);
        assert_eq!(env.sort, SortKey::ByPrice);
        assert!(matches!(env.log_level, LogLevel::Warn));
    }

    #[test]
    fn test_env_rejects_unknown_filter() {
        Env::try_parse_from(["order-board", "--filter", "Shipped"]).unwrap_err();
    }
}
