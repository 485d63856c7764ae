use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use tally_types::api::ErrorEnvelope;
use tally_types::notification::NotificationError;

/// Every failure a handler can report. Rendered as
/// `{"error":{"code":...,"description":...}}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid signature.")]
    InvalidSignature,

    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    InvalidUser(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::InvalidUser(_) => "INVALID_USER",
            Self::Unprocessable(_) => "422",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidSignature | Self::InvalidParameter(_) | Self::InvalidUser(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unknown_user(user_id: &str) -> Self {
        Self::InvalidUser(format!("No user {} found in test db", user_id))
    }
}

impl From<NotificationError> for ApiError {
    fn from(err: NotificationError) -> Self {
        Self::InvalidParameter(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidParameter(format!("Malformed payload: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("Request rejected ({}): {}", self.code(), self);
        }

        let body = ErrorEnvelope::new(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}
