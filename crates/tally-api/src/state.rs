use std::sync::Arc;

use tally_store::Store;

use crate::paystation::PaystationClient;

pub type AppState = Arc<AppStateInner>;

/// Shared state for the webhook demo server.
pub struct AppStateInner {
    pub store: Store,
    /// Project secret used to sign webhook requests.
    pub secret_key: String,
    pub paystation: PaystationClient,
}

/// Shared state for the login token verifier.
#[derive(Clone)]
pub struct VerifierState {
    pub login_secret: Arc<str>,
    /// Echo the decoded claims back instead of `{"verified":true}`.
    pub dump_payload: bool,
}
