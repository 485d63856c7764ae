use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::Response,
};
use tracing::{debug, info};

use tally_types::api::{RegisterUserRequest, VerifyUserRequest};

use crate::error::ApiError;
use crate::state::AppState;
use crate::webhook::check_signature;

/// POST /user/register: add a demo user. Not signed.
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let req: RegisterUserRequest = serde_json::from_slice(&body)?;
    debug!("Registering user {:?} ({:?})", req.username, req.email);

    if req.username.is_empty() {
        return Err(ApiError::InvalidParameter("username is required".into()));
    }

    let password_hash = match req.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let created = state.store.create_user(
        &req.username,
        req.email.as_deref(),
        password_hash.as_deref(),
    )?;
    if !created {
        return Err(ApiError::InvalidParameter(format!(
            "User {} already exists",
            req.username
        )));
    }

    info!("User {} registered", req.username);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /user/verify: signed check that a user exists.
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    check_signature(&headers, &body, &state.secret_key)?;

    let req: VerifyUserRequest = serde_json::from_slice(&body)?;
    let user = state
        .store
        .get_user(&req.username)?
        .ok_or_else(|| ApiError::unknown_user(&req.username))?;

    info!(
        "User {} verified (email: {}, password set: {}, created {})",
        user.id,
        user.email.as_deref().unwrap_or("<none>"),
        user.password.is_some(),
        user.created_at
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Force the connection closed after each user route response.
pub async fn close_connection(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}
