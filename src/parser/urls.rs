use url::Url;

use crate::config::BASE_URL;

/// Resolve `href` against `base`. Absolute inputs come back unchanged;
/// blank hrefs and unparsable bases resolve to `None`.
pub fn resolve(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if Url::parse(href).is_ok() {
        return Some(href.to_string());
    }
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

/// Resolve against the site's base URL.
pub fn absolute(href: &str) -> Option<String> {
    resolve(BASE_URL, href)
}

/// Last non-empty path segment, used to name per-category snapshots.
pub fn last_segment(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(|s| s.to_string())
}
