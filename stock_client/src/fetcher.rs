//! Fetching symbols and series from the stock server over HTTP.
//!
//! Error bodies are `{ "error": "<message>" }`. For series requests the message text is
//! what identifies the failure, so it is mapped back onto `StockError` here and callers
//! only ever look at `ClientError::kind`.
use chrono::{DateTime, Utc};
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use stock_common::net::{AS_OF_PARAM, STOCKS_PATH, series_path};
use stock_common::{PricePoint, StockError};

use crate::error::ClientError;
use crate::result::Result;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockList {
    stock_symbols: Vec<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin HTTP wrapper around the two server endpoints.
pub struct StockFetcher {
    client: Client,
    base_url: String,
}

impl StockFetcher {
    /// Creates a fetcher for the server at `base_url`, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /stocks`.
    pub async fn symbols(&self) -> Result<Vec<String>> {
        let url = format!("{}{}", self.base_url, STOCKS_PATH);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(remote_error(status.as_u16(), &body));
        }
        let list: StockList = response.json().await?;
        Ok(list.stock_symbols)
    }

    /// `GET /stocks/{symbol}`, optionally pinned to `as_of`.
    pub async fn series(
        &self,
        symbol: &str,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Vec<PricePoint>> {
        let url = format!(
            "{}{}",
            self.base_url,
            series_path(&urlencoding::encode(symbol))
        );
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(as_of) = as_of {
            request = request.query(&[(AS_OF_PARAM, as_of.to_rfc3339())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(remote_error(status.as_u16(), &body));
        }
        Ok(response.json().await?)
    }
}

/// Runs `call` until it succeeds, fails with a non-retryable error, or `retries`
/// repetitions are used up.
pub async fn with_retries<T, F, Fut>(retries: u32, delay: Duration, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match call().await {
            Err(e) if e.is_retryable() && attempt < retries => {
                attempt += 1;
                warn!("{} (retry {}/{})", e, attempt, retries);
                tokio::time::sleep(delay).await;
            }
            result => return result,
        }
    }
}

fn remote_error(status: u16, body: &[u8]) -> ClientError {
    let source = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(body) => StockError::from_remote_message(&body.error),
        Err(_) => StockError::Internal(String::from_utf8_lossy(body).into_owned()),
    };
    ClientError::Remote { status, source }
}
