use serde::Deserialize;

/// Main configuration structure for Wares
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub site: Vec<SiteEntry>,
}

impl Config {
    /// Domain patterns of every configured site, in declaration order
    pub fn allowed_domains(&self) -> Vec<String> {
        self.site.iter().map(|s| s.domain.clone()).collect()
    }

    /// Seed URLs across every configured site, in declaration order
    pub fn seed_urls(&self) -> Vec<String> {
        self.site.iter().flat_map(|s| s.seed_urls()).collect()
    }
}

/// Crawl budget and HTTP behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum link-hop depth from seed URLs (seeds are depth 0)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of pages fetched across the whole run
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Maximum number of fetches in flight at once
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: u32,

    /// Per-request timeout (milliseconds)
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Product-URL classification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfig {
    /// Path patterns (regex) that identify product pages
    #[serde(rename = "product-patterns", default = "default_product_patterns")]
    pub product_patterns: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            product_patterns: default_product_patterns(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the JSON results file is written to
    #[serde(rename = "results-path", default = "default_results_path")]
    pub results_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: default_results_path(),
        }
    }
}

/// A site to crawl: a domain pattern plus its seed URLs
#[derive(Debug, Clone, Deserialize)]
pub struct SiteEntry {
    /// Domain pattern (e.g., "example.com" or "*.example.com")
    pub domain: String,

    /// Seed URLs to start crawling from; defaults to the domain root
    #[serde(default)]
    pub seeds: Vec<String>,
}

impl SiteEntry {
    /// Seed URLs for this site
    ///
    /// When no seeds are configured the domain root is used, with any
    /// wildcard prefix stripped ("*.example.com" seeds from
    /// "https://example.com/").
    pub fn seed_urls(&self) -> Vec<String> {
        if self.seeds.is_empty() {
            let base = self.domain.strip_prefix("*.").unwrap_or(&self.domain);
            vec![format!("https://{}/", base)]
        } else {
            self.seeds.clone()
        }
    }
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_product_patterns() -> Vec<String> {
    ["/product/", "/item/", "/p/", "/catalogue/"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_results_path() -> String {
    "./product_urls.json".to_string()
}
