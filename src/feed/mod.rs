//! Data source adapter: one read of a fixed resource holding a JSON array of
//! orders.

use async_trait::async_trait;
use board_orders::Order;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

mod file;
mod fixed;
mod http;

pub use file::FileFeed;
pub use fixed::StaticFeed;
pub use http::HttpFeed;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Fetching {url} failed with status: {status}, body: {body}")]
    RequestFailed {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed order payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Order feed unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait OrderFeed: Send + Sync {
    /// Reads the whole resource and parses it. Called once per session.
    async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError>;

    /// Where the orders come from, for logs.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Http(Url),
    File(PathBuf),
}

#[derive(Debug, Error)]
pub enum FeedSourceError {
    #[error("Order source must not be empty")]
    Empty,
    #[error("Invalid file URL: {0}")]
    InvalidFileUrl(Url),
}

impl FromStr for FeedSource {
    type Err = FeedSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FeedSourceError::Empty);
        }

        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Http(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::File)
                .map_err(|()| FeedSourceError::InvalidFileUrl(url)),
            _ => Ok(Self::File(PathBuf::from(s))),
        }
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FeedSource {
    pub fn into_feed(self) -> Box<dyn OrderFeed> {
        match self {
            Self::Http(url) => Box::new(HttpFeed::new(url)),
            Self::File(path) => Box::new(FileFeed::new(path)),
        }
    }
}

pub(crate) fn parse_orders(body: &[u8]) -> Result<Vec<Order>, FetchError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_source_http_url() {
        let source: FeedSource = "http://localhost:5173/mockOrders.json".parse().unwrap();
        assert_eq!(
            source,
            FeedSource::Http(Url::parse("http://localhost:5173/mockOrders.json").unwrap())
        );
    }

    #[test]
    fn test_feed_source_plain_path() {
        let source: FeedSource = "public/mockOrders.json".parse().unwrap();
        assert_eq!(source, FeedSource::File(PathBuf::from("public/mockOrders.json")));
    }

    #[test]
    fn test_feed_source_file_url() {
        let source: FeedSource = "file:///srv/orders.json".parse().unwrap();
        assert_eq!(source, FeedSource::File(PathBuf::from("/srv/orders.json")));
    }

    #[test]
    fn test_feed_source_empty() {
        assert!(matches!(
            "  ".parse::<FeedSource>().unwrap_err(),
            FeedSourceError::Empty
        ));
    }

    #[test]
    fn test_parse_orders_rejects_non_array() {
        let err = parse_orders(br#"{"orders": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn test_parse_orders_empty_array() {
        assert!(parse_orders(b"[]").unwrap().is_empty());
    }
}
