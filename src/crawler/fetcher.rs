//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client
//! - GET requests for page content
//! - Error classification into the per-page failure taxonomy
//!
//! Failures here are always per-page and recoverable: the coordinator skips
//! the page and the crawl continues. Nothing in this module retries.

use crate::config::CrawlerConfig;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Per-page fetch failures
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request exceeded the configured timeout
    #[error("request timeout")]
    Timeout,

    /// Connection could not be established (refused, DNS failure, TLS error)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport-level failure
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("HTTP status {0}")]
    HttpStatus(u16),
}

/// A successfully fetched page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against this
    pub final_url: Url,

    /// Raw response body
    pub html: String,
}

/// Builds the HTTP client shared by every fetch in the run
///
/// Redirects are followed transparently by reqwest's default policy (up to
/// 10 hops). The total request timeout comes from configuration; connection
/// establishment gets its own, shorter cap.
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let request_timeout = Duration::from_millis(config.request_timeout_ms);
    let connect_timeout = request_timeout.min(Duration::from_secs(10));

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(FetchedPage)` - 2xx response with its body
/// * `Err(FetchError)` - classified per-page failure
pub async fn fetch_url(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let final_url = response.url().clone();
    let html = response.text().await.map_err(classify_error)?;

    Ok(FetchedPage { final_url, html })
}

/// Maps a reqwest error onto the fetch failure taxonomy
fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Network(error.to_string())
    }
}
