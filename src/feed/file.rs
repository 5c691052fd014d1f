use async_trait::async_trait;
use board_orders::Order;
use std::path::PathBuf;
use tracing::debug;

use super::{FetchError, OrderFeed, parse_orders};

#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OrderFeed for FileFeed {
    async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!("Read {} bytes from {}", body.len(), self.path.display());

        parse_orders(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
