use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use haven_server::state::AppState;

/// `haven health` — liveness probe for container health checks.
///
/// Calls `GET http://localhost:$HAVEN_PORT/health`. Exit code 0 on HTTP 200,
/// 1 otherwise.
async fn run_health_check() -> i32 {
    let port = std::env::var("HAVEN_PORT").unwrap_or_else(|_| "3000".to_string());
    let url = format!("http://localhost:{}/health", port);
    match reqwest::get(&url).await {
        Ok(resp) if resp.status().is_success() => 0,
        _ => 1,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("health") {
        std::process::exit(run_health_check().await);
    }

    // Structured JSON logging. Level controlled via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("haven=info".parse()?),
        )
        .json()
        .init();

    let cfg = haven_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    if cfg.features.fallback_to_json && cfg.catalog_path.is_none() {
        tracing::warn!(
            "FALLBACK_TO_JSON is on but HAVEN_CATALOG_PATH is unset; \
             product images have no fallback source"
        );
    }
    if !cfg.features.use_database && !cfg.features.fallback_to_json {
        tracing::warn!("USE_DATABASE and FALLBACK_TO_JSON are both off; product lists will be empty");
    }

    info!(
        data_source = %cfg.data_source_url,
        use_database = cfg.features.use_database,
        fallback_to_json = cfg.features.fallback_to_json,
        "Feature table loaded"
    );

    let state = Arc::new(AppState::new(cfg.clone())?);

    let addr = format!("0.0.0.0:{}", cfg.port);
    let app = haven_server::app::build_app(Arc::clone(&state));

    info!(port = cfg.port, "Handcrafted Haven dashboard listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
