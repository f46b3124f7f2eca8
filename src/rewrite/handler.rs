//! `POST /rewrite`: the interceptor endpoint called by the bootstrap script.
//!
//! Takes a JSON [`RequestDescriptor`] and answers with the rewritten
//! descriptor. The current host is resolved from the inbound headers only
//! when the request is actually redirected. A malformed URL is rejected
//! with `422` so the viewer shows a failed request instead of sending it
//! somewhere unintended.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::host::current_host;
use super::{redirect, redirect_path, RequestDescriptor};
use crate::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct RewriteErrorBody {
    pub error: String,
}

fn reject(status: StatusCode, error: String) -> Response {
    (status, Json(RewriteErrorBody { error })).into_response()
}

pub async fn rewrite_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<RequestDescriptor>,
) -> Response {
    let correlation_id = headers
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from);

    let path = match redirect_path(&request.url) {
        Ok(Some(path)) => path,
        Ok(None) => {
            tracing::debug!(
                correlation_id = %correlation_id,
                url = %request.url,
                "request passed through"
            );
            state.stats.passthrough.fetch_add(1, Ordering::Relaxed);
            return Json(request).into_response();
        }
        Err(e) => {
            tracing::warn!(
                correlation_id = %correlation_id,
                error = %e,
                "rewrite rejected"
            );
            state.stats.rejected.fetch_add(1, Ordering::Relaxed);
            return reject(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
        }
    };

    // Only a redirect needs to know where the page was loaded from.
    let Some(host) = current_host(&headers) else {
        tracing::warn!(
            correlation_id = %correlation_id,
            url = %request.url,
            "cannot resolve current host"
        );
        state.stats.rejected.fetch_add(1, Ordering::Relaxed);
        return reject(
            StatusCode::BAD_REQUEST,
            "request has no Host header".to_string(),
        );
    };

    let rewritten = redirect(&request, &host, &path);
    tracing::debug!(
        correlation_id = %correlation_id,
        from = %request.url,
        to = %rewritten.url,
        "request redirected"
    );
    state.stats.redirected.fetch_add(1, Ordering::Relaxed);
    Json(rewritten).into_response()
}
