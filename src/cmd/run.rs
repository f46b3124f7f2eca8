//! `docgate run`: start the documentation server.
//!
//! Loads configuration from a file (or the built-in defaults), starts the
//! Axum HTTP server with graceful shutdown, and spawns a background
//! config refresh loop for hot-reloading.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::cli::RunArgs;
use crate::config::sources;
use crate::config::ConfigResolver;
use crate::error::DocgateError;
use crate::logging;
use crate::rewrite::{TARGET_PORT, TARGET_SCHEME, TRIGGER};
use crate::server::{self, AppState, LoadedConfig};

/// Config files looked up in the working directory, in order.
pub const CONFIG_CANDIDATES: &[&str] = &[
    "docgate.yaml",
    "docgate.yml",
    "docgate.json",
    "docgate.toml",
];

pub async fn execute(args: RunArgs) -> Result<(), DocgateError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let resolver = resolve_config_source(args.config.as_deref()).await?;
    let (config, version) = resolver.load().await?;

    let document_count = config.total_documents();
    let docs_dir = config.docs_dir.clone();

    if !tokio::fs::try_exists(&docs_dir).await.unwrap_or(false) {
        tracing::warn!(
            docs_dir = %docs_dir.display(),
            "docs directory does not exist, API documents will 404"
        );
    }

    let state = Arc::new(AppState::new(LoadedConfig::new(
        config,
        version,
        resolver.source_name(),
    )));

    // Shutdown signal: dropping shutdown_tx closes the channel and stops the refresh loop
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let refresh_state = state.clone();
    let poll_interval = args.poll_interval;
    let refresh_handle = tokio::spawn(async move {
        config_refresh_loop(refresh_state, resolver, poll_interval, shutdown_rx).await;
    });

    let router = server::build_router(state, &docs_dir, args.max_body);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        documents = document_count,
        docs_dir = %docs_dir.display(),
        trigger = TRIGGER,
        target = %format!("{TARGET_SCHEME}://<page-host>:{TARGET_PORT}"),
        "docgate started"
    );

    let graceful_shutdown = async move {
        server::shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(graceful_shutdown)
        .await?;

    if let Err(e) = refresh_handle.await {
        tracing::error!(error = %e, "config refresh task failed");
    }

    tracing::info!("docgate stopped");
    Ok(())
}

/// Pick the config source: explicit path, then auto-detected file,
/// then the built-in defaults.
pub async fn resolve_config_source(
    explicit: Option<&Path>,
) -> Result<ConfigResolver, DocgateError> {
    if let Some(path) = explicit {
        return Ok(ConfigResolver::new(Box::new(sources::from_path(path)?)));
    }

    for name in CONFIG_CANDIDATES {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return Ok(ConfigResolver::new(Box::new(sources::from_path(&path)?)));
        }
    }

    tracing::info!("no config file found, serving built-in defaults");
    Ok(ConfigResolver::builtin())
}

async fn config_refresh_loop(
    state: Arc<AppState>,
    resolver: ConfigResolver,
    interval_secs: u64,
    mut shutdown: tokio::sync::watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    interval.tick().await; // Skip first immediate tick

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = shutdown.changed() => {
                tracing::debug!("config refresh loop shutting down");
                return;
            }
        }

        let current_version = {
            let config = state.config.read().await;
            config.version.clone()
        };

        match resolver.source().has_changed(&current_version).await {
            Ok(true) => {
                tracing::info!("config change detected, reloading");
                match resolver.load().await {
                    Ok((config, version)) => {
                        let document_count = config.total_documents();
                        let short = version.short();
                        let mut loaded = state.config.write().await;
                        loaded.config = Arc::new(config);
                        loaded.version = version;
                        loaded.loaded_at = std::time::Instant::now();
                        drop(loaded);
                        state
                            .stats
                            .config_reloads
                            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                        tracing::info!(documents = document_count, version = %short, "config reloaded");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "config reload failed, keeping current config");
                    }
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "config change check failed");
            }
        }
    }
}
