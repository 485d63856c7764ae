use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::Value;

/// Verify an HS256 login token and return its claims.
///
/// Claims are kept as raw JSON since the login service adds provider
/// specific fields. `exp` is required and checked.
pub fn verify_token(token: &str, secret: &str) -> Result<Value> {
    let token_data = decode::<Value>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(token_data.claims)
}
