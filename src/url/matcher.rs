use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Compiled product-page patterns
///
/// A URL is considered a product URL when its path (query included, since
/// some storefronts address products through query parameters) matches at
/// least one of the configured patterns. Patterns are regular expressions,
/// so plain path markers like `/product/` work as literals while targets
/// with numbered segments can use forms like `/p/\d+`.
#[derive(Debug, Clone)]
pub struct ProductMatcher {
    patterns: Vec<Regex>,
}

impl ProductMatcher {
    /// Compiles the configured pattern strings
    ///
    /// # Arguments
    ///
    /// * `patterns` - Pattern source strings from the run configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ProductMatcher)` - All patterns compiled
    /// * `Err(ConfigError)` - A pattern failed to compile
    pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = Regex::new(pattern).map_err(|e| {
                ConfigError::InvalidPattern(format!("product pattern '{}': {}", pattern, e))
            })?;
            compiled.push(regex);
        }
        Ok(Self { patterns: compiled })
    }

    /// Tests whether the URL addresses a product page
    ///
    /// Pure predicate; O(number of patterns) per call.
    pub fn is_product(&self, url: &Url) -> bool {
        let haystack = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };

        self.patterns.iter().any(|regex| regex.is_match(&haystack))
    }

    /// Number of compiled patterns
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}
