use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::state::{AppState, VerifierState};
use crate::{paystation, purchases, users, verify, webhook};

/// Routes of the webhook demo server.
pub fn webhook_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/user/register", post(users::register))
        .route("/user/verify", post(users::verify))
        .layer(middleware::map_response(users::close_connection));

    Router::new()
        .route("/webhook", post(webhook::handle_notification))
        .route("/paystation", post(paystation::create_token))
        .route("/purchases/{user_id}", get(purchases::take_purchases))
        .route("/health", get(health))
        .merge(user_routes)
        .with_state(state)
}

/// Routes of the login token verifier.
pub fn verifier_router(state: VerifierState) -> Router {
    Router::new()
        .route("/verify", post(verify::verify))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn health() -> &'static str {
    "ok"
}
