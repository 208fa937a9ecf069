//! HTML link extraction
//!
//! This module parses HTML content and collects anchor hrefs. Extraction is
//! CPU-bound and runs on the blocking worker pool (see the coordinator), so
//! parsing one large page never stalls the scheduling of other fetches.

use scraper::{Html, Selector};

/// Extracts every anchor's href attribute, in document order
///
/// The returned values are raw hrefs exactly as they appear in the markup;
/// resolution against the page URL is the normalizer's job. Malformed HTML
/// degrades gracefully: html5ever recovers what it can and extraction yields
/// whatever anchors are parseable rather than failing the page.
///
/// # Example
///
/// ```
/// use wares::crawler::extract_links;
///
/// let html = r#"<html><body><a href="/product/1">One</a><a href="/about">About</a></body></html>"#;
/// assert_eq!(extract_links(html), vec!["/product/1", "/about"]);
/// ```
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                links.push(href.to_string());
            }
        }
    }

    links
}
