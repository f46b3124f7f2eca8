//! docgate hosts an API documentation viewer and redirects its
//! "try it out" calls.
//!
//! It serves the viewer page, a generated bootstrap script and the static
//! API description documents. The bootstrap script routes every outgoing
//! request through the request rewriter, which sends versioned API calls
//! (`/v1/` in the path or query) to `http://<page-host>:8080` with path
//! and query preserved.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, init, validate,
//!   health, rewrite).
//! - [`config`] -- Configuration loading, validation, and hot-reloading via the
//!   [`ConfigSource`](config::ConfigSource) trait.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`rewrite`] -- The pure request URL rewriter, current host resolution,
//!   and the `POST /rewrite` endpoint.
//! - [`server`] -- Axum server setup, shared application state, and
//!   graceful shutdown.
//! - [`viewer`] -- Rendering of the host page and bootstrap script.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

// Binary crate: public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod rewrite;
pub mod server;
pub mod viewer;
