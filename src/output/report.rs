use crate::output::{OutputError, OutputResult};
use serde::Serialize;
use std::path::Path;

/// Terminal artifact of a crawl run
///
/// The product URLs are in discovery order. Discovery order reflects fetch
/// completion order within a breadth-first level, so it is stable in meaning
/// but not byte-identical across runs.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// Number of fetch operations issued (never exceeds max_pages)
    pub pages_fetched: u32,

    /// Fetches that failed with a network error or non-2xx status
    pub failed_fetches: u32,

    /// Unique URLs admitted to the frontier over the run
    pub urls_discovered: usize,

    /// Discovered product URLs, in discovery order
    pub product_urls: Vec<String>,
}

/// Writes the report to a pretty-printed JSON file
///
/// # Arguments
///
/// * `report` - The finished crawl report
/// * `path` - Destination file; overwritten if it exists
pub fn write_report(report: &CrawlReport, path: &Path) -> OutputResult<()> {
    let json = serde_json::to_string_pretty(report).map_err(OutputError::Serialize)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Prints run statistics and the product list to stdout
pub fn print_summary(report: &CrawlReport) {
    println!("Crawl summary:");
    println!("  Pages fetched:   {}", report.pages_fetched);
    println!("  Failed fetches:  {}", report.failed_fetches);
    println!("  URLs discovered: {}", report.urls_discovered);
    println!("  Product URLs:    {}", report.product_urls.len());

    for url in &report.product_urls {
        println!("    - {}", url);
    }
}
