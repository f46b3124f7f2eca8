//! `docgate health`: check the health of a running instance.
//!
//! Sends a `GET /health` request to the specified URL and prints either
//! the raw JSON or a summary of the served documents and rewrite counters.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::DocgateError;
use crate::health::HealthResponse;
use crate::rewrite::TARGET_PORT;

const TIMEOUT: Duration = Duration::from_secs(10);

fn request_failed(e: impl std::error::Error + Send + Sync + 'static) -> DocgateError {
    DocgateError::HttpRequest {
        source: Box::new(e),
    }
}

/// `GET <base>/health` and return the body of a successful answer.
async fn fetch_health(base: &str) -> Result<Bytes, DocgateError> {
    let uri: hyper::Uri = format!("{}/health", base.trim_end_matches('/'))
        .parse()
        .map_err(|e: hyper::http::uri::InvalidUri| DocgateError::UriParse {
            source: Box::new(e),
        })?;

    let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
    let req = hyper::Request::get(uri)
        .body(Full::new(Bytes::new()))
        .map_err(request_failed)?;

    let response = tokio::time::timeout(TIMEOUT, client.request(req))
        .await
        .map_err(|_| DocgateError::HttpRequest {
            source: format!("no answer within {}s", TIMEOUT.as_secs()).into(),
        })?
        .map_err(request_failed)?;

    let status = response.status();
    if !status.is_success() {
        return Err(DocgateError::HealthCheckFailed(status));
    }

    Ok(response
        .into_body()
        .collect()
        .await
        .map_err(request_failed)?
        .to_bytes())
}

pub async fn execute(args: HealthArgs) -> Result<(), DocgateError> {
    let body = fetch_health(&args.url).await?;

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    match serde_json::from_slice::<HealthResponse>(&body) {
        Ok(health) => print!("{}", render_summary(&args.url, &health)),
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{}", String::from_utf8_lossy(&body));
        }
    }

    Ok(())
}

/// Human-readable summary of a health payload.
#[must_use]
pub fn render_summary(url: &str, health: &HealthResponse) -> String {
    let stats = &health.stats;
    let handled = stats.requests_redirected + stats.requests_passed_through + stats.requests_rejected;

    let mut lines = vec![
        format!("\u{2713} docgate {} is {} ({url})", health.version, health.status),
        format!("  uptime     {}", format_uptime(health.uptime_seconds)),
        format!(
            "  config     {} @ {}, loaded {} ago",
            health.config.source,
            health.config.version,
            format_uptime(health.config.loaded_ago_seconds)
        ),
        format!("  documents  {}", health.config.documents),
    ];

    if handled == 0 {
        lines.push("  rewrites   none yet".to_string());
    } else {
        lines.push(format!(
            "  rewrites   {handled} handled: {} redirected to :{TARGET_PORT}, {} unchanged, {} rejected",
            stats.requests_redirected, stats.requests_passed_through, stats.requests_rejected
        ));
    }
    if stats.config_reloads > 0 {
        lines.push(format!("  reloads    {}", stats.config_reloads));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
