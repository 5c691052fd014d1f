use async_trait::async_trait;
use board_orders::Order;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use super::{FetchError, OrderFeed, parse_orders};

/// Fetches the order list with a single `GET`.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: reqwest::Client,
    url: Url,
}

impl HttpFeed {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl OrderFeed for HttpFeed {
    async fn fetch_orders(&self) -> Result<Vec<Order>, FetchError> {
        let headers = [(header::ACCEPT, HeaderValue::from_static("application/json"))]
            .into_iter()
            .collect::<HeaderMap>();

        let response = self
            .client
            .get(self.url.clone())
            .headers(headers)
            .send()
            .await?;

        let status = response.status();
        debug!("GET {} -> {status}", self.url);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::RequestFailed {
                url: self.url.to_string(),
                status,
                body,
            });
        }

        let body = response.bytes().await?;
        parse_orders(&body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
