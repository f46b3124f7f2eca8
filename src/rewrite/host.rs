//! Resolve the hostname the browser used to reach the docs page.
//!
//! This is the server-side equivalent of `window.location.hostname`:
//! the first `X-Forwarded-Host` entry when a reverse proxy sits in front,
//! otherwise the `Host` header, with any port removed. IPv6 literals
//! keep their brackets.

use axum::http::header::HOST;
use axum::http::HeaderMap;

#[must_use]
pub fn current_host(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-host")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let authority = forwarded.or_else(|| {
        headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    })?;

    normalize_host(authority)
}

/// Reduce an authority such as `Docs.Local:8082` to the lowercased
/// hostname the target URL is built from. `None` when no hostname is left.
#[must_use]
pub fn normalize_host(authority: &str) -> Option<String> {
    let hostname = strip_port(authority.trim());
    if hostname.is_empty() {
        None
    } else {
        Some(hostname.to_ascii_lowercase())
    }
}

/// Remove a trailing `:port` from an authority, leaving `[v6]` intact.
#[must_use]
pub fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        return authority
            .find(']')
            .map_or(authority, |end| &authority[..=end]);
    }
    authority
        .rsplit_once(':')
        .map_or(authority, |(host, _port)| host)
}
