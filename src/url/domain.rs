use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to
/// lowercase. If the URL has no host (which shouldn't happen for valid
/// HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wares::url::extract_domain;
///
/// let url = Url::parse("https://Books.ToScrape.com/catalogue/").unwrap();
/// assert_eq!(extract_domain(&url), Some("books.toscrape.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks if a domain matches a wildcard pattern
///
/// This function supports two types of patterns:
/// 1. Exact match: "example.com" matches only "example.com"
/// 2. Wildcard match: "*.example.com" matches:
///    - "example.com" (the bare domain)
///    - "shop.example.com" (single subdomain)
///    - "api.v2.example.com" (nested subdomains)
///
/// # Examples
///
/// ```
/// use wares::url::matches_wildcard;
///
/// assert!(matches_wildcard("example.com", "example.com"));
/// assert!(!matches_wildcard("example.com", "other.com"));
///
/// assert!(matches_wildcard("*.example.com", "example.com"));
/// assert!(matches_wildcard("*.example.com", "shop.example.com"));
/// assert!(!matches_wildcard("*.example.com", "example.org"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    if let Some(base) = pattern.strip_prefix("*.") {
        // Wildcard pattern: matches the base domain itself or any subdomain
        candidate == base || candidate.ends_with(&format!(".{}", base))
    } else {
        // Exact match only
        candidate == pattern
    }
}

/// The set of domain patterns a crawl is confined to
///
/// A link survives domain filtering only if its host matches one of the
/// configured site patterns. Patterns are compared lowercase; hosts coming
/// out of [`extract_domain`] already are.
#[derive(Debug, Clone)]
pub struct DomainAllowlist {
    patterns: Vec<String>,
}

impl DomainAllowlist {
    /// Builds an allow-list from domain patterns (exact or `*.`-wildcard)
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Returns true if the URL's host matches any allowed pattern
    pub fn permits(&self, url: &Url) -> bool {
        match extract_domain(url) {
            Some(domain) => self
                .patterns
                .iter()
                .any(|pattern| matches_wildcard(pattern, &domain)),
            None => false,
        }
    }
}
