//! `vidsearch-api` — standalone JSON API server for the aggregation engine.

use std::sync::Arc;

use vidsearch::server::ApiServer;
use vidsearch::{SearchConfig, SearchService};

/// Address served when `VIDSEARCH_ADDR` is not set.
const DEFAULT_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let bind_addr =
        std::env::var("VIDSEARCH_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let service = Arc::new(SearchService::new(SearchConfig::default())?);
    let server = ApiServer::start(service, &bind_addr).await?;

    tracing::info!("vidsearch-api ready on http://{}/api/", server.addr());

    server.join().await;
    Ok(())
}
