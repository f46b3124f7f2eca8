//! Viewer host page and bootstrap script.
//!
//! [`index_handler`] and [`initializer_handler`] render the page and
//! `swagger-initializer.js` from the live config on every request, so a
//! config reload is picked up on the next page load. Rendering itself is
//! in [`page`] and [`initializer`].

pub mod initializer;
pub mod page;

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{Html, IntoResponse};

use crate::config::model::Config;
use crate::server::AppState;

async fn current_config(state: &AppState) -> Arc<Config> {
    Arc::clone(&state.config.read().await.config)
}

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let config = current_config(&state).await;
    Html(page::render_index(&config.viewer))
}

pub async fn initializer_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = current_config(&state).await;
    (
        [
            (CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (CACHE_CONTROL, "no-cache"),
        ],
        initializer::render_initializer(&config.viewer),
    )
}
