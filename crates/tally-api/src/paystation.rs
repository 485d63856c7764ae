use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::{debug, info};

use tally_types::api::{PaystationTokenRequest, PaystationTokenResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Upper bound on one merchant API round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the merchant API's payment UI token endpoint.
pub struct PaystationClient {
    http: reqwest::Client,
    api_url: String,
    merchant_id: String,
    api_key: String,
    project_id: u64,
}

impl PaystationClient {
    pub fn new(
        api_url: impl Into<String>,
        merchant_id: impl Into<String>,
        api_key: impl Into<String>,
        project_id: u64,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build merchant API client")?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            merchant_id: merchant_id.into(),
            api_key: api_key.into(),
            project_id,
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.merchant_id.is_empty() && !self.api_key.is_empty()
    }

    fn token_url(&self) -> String {
        format!(
            "{}/merchant/v2/merchants/{}/token",
            self.api_url, self.merchant_id
        )
    }

    /// Request a payment UI token for `user_id`.
    pub async fn create_token(&self, user_id: &str) -> Result<String> {
        if !self.is_configured() {
            bail!("PayStation merchant credentials are not configured");
        }

        let body = PaystationTokenRequest::for_user(user_id, self.project_id);
        debug!("Requesting PayStation token for user {}", user_id);

        let response: PaystationTokenResponse = self
            .http
            .post(self.token_url())
            .basic_auth(&self.merchant_id, Some(&self.api_key))
            .json(&body)
            .send()
            .await
            .context("Merchant API request failed")?
            .error_for_status()?
            .json()
            .await
            .context("Merchant API returned an unreadable body")?;

        response
            .token
            .ok_or_else(|| anyhow!("Merchant API response has no token"))
    }
}

/// POST /paystation: body is the user id as plain text, reply is the token.
pub async fn create_token(
    State(state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = body.trim();
    if user_id.is_empty() {
        return Err(ApiError::InvalidParameter("user id is required".into()));
    }

    let token = state
        .paystation
        .create_token(user_id)
        .await
        .map_err(|e| ApiError::Unprocessable(format!("{:#}", e)))?;

    info!("PayStation token issued for user {}", user_id);
    Ok((StatusCode::OK, token))
}
