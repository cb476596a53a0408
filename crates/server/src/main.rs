use std::sync::Arc;

use anyhow::Context;
use cinedex_server::config::ServerConfig;
use cinedex_upstream::catalog::Catalog;
use cinedex_upstream::client::UpstreamClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    info!(
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout.as_secs(),
        "upstream configured"
    );

    let client =
        UpstreamClient::new(config.upstream.clone()).context("failed to build upstream client")?;
    let app_state = cinedex_server::state::AppState::new(Catalog::new(Arc::new(client)));

    let app = cinedex_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
