use url::Url;

/// Schemes that are never crawlable and are rejected before resolution
const REJECTED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Resolves a raw href against the URL of the page it was found on
///
/// # Resolution Steps
///
/// 1. Trim surrounding whitespace; reject empty hrefs
/// 2. Reject `javascript:`, `mailto:`, `tel:`, and `data:` links
/// 3. Reject fragment-only links (same-page anchors)
/// 4. Resolve against the base URL (relative, path-relative, and
///    protocol-relative forms all resolve here; the url crate lower-cases
///    scheme and host as part of parsing)
/// 5. Reject anything that is not http or https after resolution
/// 6. Strip the fragment; query strings are preserved, since product pages
///    may be distinguished by query parameters
///
/// Rejection is signalled by returning `None`; this function never fails.
///
/// # Arguments
///
/// * `href` - The raw href attribute value
/// * `base` - The URL of the page the href was found on
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wares::url::resolve_href;
///
/// let base = Url::parse("https://example.com/shop/").unwrap();
///
/// let resolved = resolve_href("/product/1", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/product/1");
///
/// assert!(resolve_href("mailto:sales@example.com", &base).is_none());
/// ```
pub fn resolve_href(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if REJECTED_SCHEMES
        .iter()
        .any(|scheme| href.starts_with(scheme))
    {
        return None;
    }

    // Same-page anchors resolve to the base URL itself; skip them outright
    if href.starts_with('#') {
        return None;
    }

    let mut resolved = base.join(href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    resolved.set_fragment(None);

    Some(resolved)
}
