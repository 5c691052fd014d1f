pub mod cli;
pub mod env;
pub mod feed;
pub mod render;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use cli::{BoardCommand, Cli, Commands, run};
pub use env::{Env, LogLevel, setup_tracing};
pub use feed::{FeedSource, FetchError, OrderFeed};
pub use store::{BoardStore, FetchState};
