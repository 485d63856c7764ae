pub mod error;
pub mod paystation;
pub mod purchases;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod users;
pub mod verify;
pub mod webhook;

pub use error::ApiError;
pub use routes::{verifier_router, webhook_router};
pub use state::{AppState, AppStateInner, VerifierState};
