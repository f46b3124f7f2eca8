//! Request URL rewriting for "try it out" calls.
//!
//! The viewer hands every outgoing request to [`rewrite_request`] before
//! dispatch. Requests whose path-and-query contains the versioned API
//! marker [`TRIGGER`] are redirected to `http://<current-host>:8080`,
//! keeping the path and query string exactly as they were. Everything
//! else is returned untouched.
//!
//! The rewriter is a pure function of the descriptor and the current
//! host. Resolving that host from an inbound request lives in [`host`],
//! and the HTTP adapter used by the bootstrap script lives in
//! [`handler`].

pub mod handler;
pub mod host;

use serde::{Deserialize, Serialize};
use url::Url;

/// Scheme every rewritten request is sent with.
pub const TARGET_SCHEME: &str = "http";

/// Port every rewritten request is sent to.
pub const TARGET_PORT: u16 = 8080;

/// Marker whose presence in the path-and-query triggers the rewrite.
pub const TRIGGER: &str = "/v1/";

/// An outgoing request as described by the viewer.
///
/// Only `url` is interpreted. All other fields (method, headers, body, ...)
/// are carried opaquely so the descriptor round-trips with the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RequestDescriptor {
    pub url: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RequestDescriptor {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RewriteError {
    #[error("malformed request URL '{url}': {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Outcome of a single rewrite, used by callers that report what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    Redirected(RequestDescriptor),
    Unchanged(RequestDescriptor),
}

impl Rewrite {
    #[must_use]
    pub fn into_descriptor(self) -> RequestDescriptor {
        match self {
            Self::Redirected(d) | Self::Unchanged(d) => d,
        }
    }

    #[must_use]
    pub const fn is_redirected(&self) -> bool {
        matches!(self, Self::Redirected(_))
    }
}

/// Extract the path-and-query portion of a request URL.
///
/// Absolute URLs (anything containing `://`) are parsed and reduced to
/// `path` plus `?query`; an empty query and the fragment are dropped.
/// Anything else is already a path-and-query and is returned verbatim.
pub fn path_and_query(url: &str) -> Result<String, RewriteError> {
    if !url.contains("://") {
        return Ok(url.to_string());
    }

    let parsed = Url::parse(url).map_err(|source| RewriteError::MalformedUrl {
        url: url.to_string(),
        source,
    })?;

    let mut out = parsed.path().to_string();
    if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
        out.push('?');
        out.push_str(query);
    }
    Ok(out)
}

/// Cheap pre-check: a URL that does not contain the trigger anywhere can
/// never have it in its path-and-query.
#[must_use]
pub fn needs_rewrite(url: &str) -> bool {
    url.contains(TRIGGER)
}

/// Build the redirected URL for an already extracted path-and-query.
#[must_use]
pub fn target_url(host: &str, path_and_query: &str) -> String {
    format!("{TARGET_SCHEME}://{host}:{TARGET_PORT}{path_and_query}")
}

/// Decide from the URL alone whether a request must be redirected.
///
/// Returns the path-and-query to send to the target, or `None` when the
/// request goes out unchanged. No host is needed to make the decision.
pub fn redirect_path(url: &str) -> Result<Option<String>, RewriteError> {
    if !needs_rewrite(url) {
        return Ok(None);
    }

    let path = path_and_query(url)?;

    // The trigger may have appeared only in the fragment or userinfo.
    Ok(path.contains(TRIGGER).then_some(path))
}

/// Redirect a descriptor to `path_and_query` on the current host.
#[must_use]
pub fn redirect(request: &RequestDescriptor, host: &str, path_and_query: &str) -> RequestDescriptor {
    RequestDescriptor {
        url: target_url(host, path_and_query),
        extra: request.extra.clone(),
    }
}

/// Rewrite a request descriptor against the current host, reporting
/// whether the request was redirected.
pub fn apply(request: &RequestDescriptor, host: &str) -> Result<Rewrite, RewriteError> {
    Ok(match redirect_path(&request.url)? {
        Some(path) => Rewrite::Redirected(redirect(request, host, &path)),
        None => Rewrite::Unchanged(request.clone()),
    })
}

/// Rewrite a request descriptor against the current host.
///
/// Non-matching descriptors come back unchanged. A malformed absolute URL
/// fails with [`RewriteError::MalformedUrl`] and the caller keeps its
/// original descriptor.
pub fn rewrite_request(
    request: &RequestDescriptor,
    host: &str,
) -> Result<RequestDescriptor, RewriteError> {
    apply(request, host).map(Rewrite::into_descriptor)
}
