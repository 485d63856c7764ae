mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use tally_api::paystation::PaystationClient;
use tally_api::shutdown::shutdown_signal;
use tally_api::{AppState, AppStateInner, webhook_router};
use tally_store::Store;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug,tally_verifier=debug,tally_api=debug,tally_store=info,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let paystation = PaystationClient::new(
        config.api_url.clone(),
        config.merchant_id.clone(),
        config.api_key.clone(),
        config.project_id,
        config.api_timeout,
    )?;
    if !paystation.is_configured() {
        warn!("TALLY_MERCHANT_ID / TALLY_API_KEY unset; /paystation will answer 422");
    }

    let state: AppState = Arc::new(AppStateInner {
        store: Store::open_in_memory()?,
        secret_key: config.secret_key.clone(),
        paystation,
    });

    let app = webhook_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Tally webhook server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal("tally"))
        .await?;

    Ok(())
}
