use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use tally_api::shutdown::shutdown_signal;
use tally_api::{VerifierState, verifier_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug,tally_verifier=debug,tally_api=debug,tally_store=info,tower_http=debug".into()),
        )
        .init();

    // Config
    let login_secret = std::env::var("TALLY_LOGIN_SECRET").unwrap_or_default();
    if login_secret.is_empty() {
        anyhow::bail!("TALLY_LOGIN_SECRET is unset; it must match the login project's JWT secret");
    }
    let dump_payload = std::env::var("TALLY_DUMP_PAYLOAD")
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    let host = std::env::var("TALLY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("TALLY_VERIFIER_PORT")
        .unwrap_or_else(|_| "3001".into())
        .parse()?;

    let state = VerifierState {
        login_secret: login_secret.into(),
        dump_payload,
    };

    let app = verifier_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Tally token verifier listening on {}", addr);
    if dump_payload {
        info!("Token payloads will be echoed back to callers");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal("tally-verifier"))
        .await?;

    Ok(())
}
