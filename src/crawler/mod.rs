//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching under a global concurrency cap
//! - HTML link extraction off the fetch path
//! - The breadth-first frontier and visited set
//! - Overall crawl coordination and budget enforcement

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_url, FetchError, FetchedPage};
pub use frontier::{Frontier, FrontierEntry};
pub use parser::extract_links;

use crate::config::Config;
use crate::output::CrawlReport;
use crate::WaresError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Seed the frontier from the configured sites
/// 3. Fetch pages breadth-first under the configured budgets
/// 4. Record every discovered product URL
///
/// # Arguments
///
/// * `config` - The validated crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The ordered product URLs and run statistics
/// * `Err(WaresError)` - Startup failed before any fetch began
pub async fn crawl(config: Config) -> Result<CrawlReport, WaresError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
