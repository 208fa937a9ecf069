//! Crawl coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates all aspects of the
//! crawling process:
//! - Seeding and draining the frontier
//! - Dispatching fetches under the global concurrency cap
//! - Feeding extracted links through the normalize/filter/match pipeline
//! - Enforcing the page budget and terminating the run
//!
//! The coordinator task is the sole owner of the frontier, the visited set,
//! the page counter, and the product set; fetch tasks own their PageResult
//! until it is handed back through the join set. That single-owner discipline
//! is what makes the at-most-once-dispatch and budget invariants hold without
//! locks.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchError};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::parser::extract_links;
use crate::output::CrawlReport;
use crate::url::{resolve_href, DomainAllowlist, ProductMatcher};
use crate::WaresError;
use reqwest::Client;
use std::collections::HashSet;
use tokio::task::JoinSet;
use url::Url;

/// Result of one fetch-and-extract task
///
/// Produced per fetch, consumed exactly once by the coordinator, then
/// discarded.
#[derive(Debug)]
struct PageResult {
    /// The page URL; for successful fetches this is the final URL after
    /// redirects, so relative links resolve correctly
    url: Url,

    /// Depth of the frontier entry this fetch came from
    depth: u32,

    /// Raw hrefs in document order; empty when the fetch failed
    links: Vec<String>,

    /// The per-page failure, if any
    error: Option<FetchError>,
}

/// Crawl lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CrawlPhase {
    /// Frontier has work and the budget still allows dispatch
    Running,
    /// Frontier empty but fetches still in flight
    Draining,
    /// Frontier and in-flight set both exhausted, or budget spent
    Done,
}

/// Ordered, deduplicated accumulator for discovered product URLs
///
/// Insertion order is discovery order; the set guard keeps a product URL
/// reachable from several pages from being recorded twice.
#[derive(Debug, Default)]
struct ProductUrlSet {
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl ProductUrlSet {
    /// Records a product URL; returns true if it was newly recorded
    fn record(&mut self, url: &Url) -> bool {
        if self.seen.insert(url.as_str().to_string()) {
            self.urls.push(url.as_str().to_string());
            true
        } else {
            false
        }
    }

    fn len(&self) -> usize {
        self.urls.len()
    }

    fn into_ordered(self) -> Vec<String> {
        self.urls
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    allowlist: DomainAllowlist,
    matcher: ProductMatcher,
    frontier: Frontier,
    products: ProductUrlSet,
    pages_fetched: u32,
    failed_fetches: u32,
}

impl Coordinator {
    /// Creates a new coordinator and seeds the frontier
    ///
    /// # Arguments
    ///
    /// * `config` - The validated crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(WaresError)` - HTTP client construction or seed parsing failed
    pub fn new(config: Config) -> Result<Self, WaresError> {
        let client = build_http_client(&config.crawler)?;
        let allowlist = DomainAllowlist::new(config.allowed_domains());
        let matcher = ProductMatcher::new(&config.matcher.product_patterns)?;

        let mut frontier = Frontier::new(config.crawler.max_depth);
        for seed in config.seed_urls() {
            let url = Url::parse(&seed)?;
            if frontier.offer(url.clone(), 0) {
                tracing::debug!("Seeded frontier with {}", url);
            }
        }

        Ok(Self {
            config,
            client,
            allowlist,
            matcher,
            frontier,
            products: ProductUrlSet::default(),
            pages_fetched: 0,
            failed_fetches: 0,
        })
    }

    /// Runs the crawl to completion
    ///
    /// The loop dispatches fetches while the frontier has entries and the
    /// page budget allows, then awaits the next completed fetch and feeds its
    /// links back through the pipeline. Reaching the page budget stops new
    /// dispatch but lets in-flight fetches complete; their results are still
    /// processed for product URLs. The run ends when nothing is in flight and
    /// nothing can be dispatched.
    pub async fn run(mut self) -> Result<CrawlReport, WaresError> {
        tracing::info!(
            "Starting crawl: {} seed(s), max_depth={}, max_pages={}, max_concurrent_requests={}",
            self.frontier.len(),
            self.config.crawler.max_depth,
            self.config.crawler.max_pages,
            self.config.crawler.max_concurrent_requests
        );

        let start_time = std::time::Instant::now();
        let mut in_flight: JoinSet<PageResult> = JoinSet::new();
        let mut phase = CrawlPhase::Running;

        loop {
            self.dispatch(&mut in_flight);

            let next_phase = self.current_phase(&in_flight);
            if next_phase != phase {
                tracing::debug!("Crawl phase: {:?} -> {:?}", phase, next_phase);
                phase = next_phase;
            }
            if phase == CrawlPhase::Done {
                break;
            }

            match in_flight.join_next().await {
                Some(Ok(page)) => self.process_page(page),
                Some(Err(e)) => {
                    // A panicked fetch task loses its page; the run goes on
                    tracing::error!("Fetch task did not complete: {}", e);
                    self.failed_fetches += 1;
                }
                None => break,
            }
        }

        if !self.frontier.is_empty() {
            tracing::info!(
                "Page budget reached with {} frontier entries abandoned",
                self.frontier.len()
            );
        }

        tracing::info!(
            "Crawl finished: {} pages fetched, {} product URLs found in {:?}",
            self.pages_fetched,
            self.products.len(),
            start_time.elapsed()
        );

        Ok(CrawlReport {
            pages_fetched: self.pages_fetched,
            failed_fetches: self.failed_fetches,
            urls_discovered: self.frontier.visited_count(),
            product_urls: self.products.into_ordered(),
        })
    }

    /// Fills the fetch pool up to the concurrency cap while budget remains
    ///
    /// pages_fetched counts dispatches, so the number of fetch operations
    /// issued can never exceed max_pages.
    fn dispatch(&mut self, in_flight: &mut JoinSet<PageResult>) {
        let cap = self.config.crawler.max_concurrent_requests as usize;

        while in_flight.len() < cap && self.pages_fetched < self.config.crawler.max_pages {
            let Some(entry) = self.frontier.take() else {
                break;
            };

            self.pages_fetched += 1;
            tracing::debug!("Fetching {} (depth {})", entry.url, entry.depth);

            let client = self.client.clone();
            in_flight.spawn(fetch_and_extract(client, entry));
        }
    }

    /// Derives the lifecycle phase from the loop state
    fn current_phase(&self, in_flight: &JoinSet<PageResult>) -> CrawlPhase {
        if in_flight.is_empty() {
            CrawlPhase::Done
        } else if self.frontier.is_empty()
            && self.pages_fetched < self.config.crawler.max_pages
        {
            CrawlPhase::Draining
        } else {
            CrawlPhase::Running
        }
    }

    /// Consumes one PageResult
    ///
    /// Failed pages are logged and dropped; they are never retried or
    /// re-queued. Each extracted link runs through resolve -> domain filter
    /// -> product match -> frontier offer at depth+1. Product recording is
    /// independent of the depth gate: a link on an in-budget page is still a
    /// product discovery even when it is itself too deep to crawl.
    fn process_page(&mut self, page: PageResult) {
        if let Some(error) = page.error {
            tracing::warn!("Skipping {}: {}", page.url, error);
            self.failed_fetches += 1;
            return;
        }

        tracing::debug!("{} yielded {} links", page.url, page.links.len());

        for href in &page.links {
            let Some(link) = resolve_href(href, &page.url) else {
                continue;
            };

            if !self.allowlist.permits(&link) {
                continue;
            }

            if self.matcher.is_product(&link) && self.products.record(&link) {
                tracing::info!("Product URL: {}", link);
            }

            self.frontier.offer(link, page.depth + 1);
        }
    }
}

/// One bounded unit of crawl work: GET the page, then extract its links
///
/// Extraction runs via spawn_blocking so the CPU-bound parse occupies the
/// blocking worker pool, not the executor threads keeping other fetches in
/// flight.
async fn fetch_and_extract(client: Client, entry: FrontierEntry) -> PageResult {
    let FrontierEntry { url, depth } = entry;

    match fetch_url(&client, &url).await {
        Ok(fetched) => {
            let html = fetched.html;
            let links = match tokio::task::spawn_blocking(move || extract_links(&html)).await {
                Ok(links) => links,
                Err(e) => {
                    tracing::error!("Link extraction worker failed for {}: {}", url, e);
                    Vec::new()
                }
            };

            PageResult {
                url: fetched.final_url,
                depth,
                links,
                error: None,
            }
        }
        Err(error) => PageResult {
            url,
            depth,
            links: Vec::new(),
            error: Some(error),
        },
    }
}
