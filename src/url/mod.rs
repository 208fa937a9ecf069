//! URL handling module for Wares
//!
//! This module provides href resolution, domain extraction, allow-list
//! matching, and product-pattern matching functionality.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, matches_wildcard, DomainAllowlist};
pub use matcher::ProductMatcher;
pub use normalize::resolve_href;
