use std::sync::Arc;

use anyhow::Result;
use apify_client::ApifyClient;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relay_api::{router, AppState, Scraper};
use relay_common::Config;

const DEFAULT_LOG_FILTER: &str = "relay=info,relay_api=info,relay_common=info,apify_client=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;

    let client = ApifyClient::with_base_url(
        config.apify_api_token.clone(),
        config.apify_base_url.clone(),
    );
    let scraper = Scraper::new(Arc::new(client), config.reddit_actor_id.clone());
    let app = router(Arc::new(AppState::new(scraper)));

    let addr = config.bind_addr();
    info!("Reddit relay starting on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Reddit relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
