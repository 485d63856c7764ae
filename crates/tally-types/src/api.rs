use serde::{Deserialize, Serialize};

use crate::models::Purchase;

// -- Error envelope --

/// `{"error":{"code":"...","description":"..."}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub description: String,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                description: description.into(),
            },
        }
    }
}

// -- Users --

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub username: String,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyUserRequest {
    #[serde(default)]
    pub username: String,
}

// -- Purchases --

#[derive(Debug, Serialize, Deserialize)]
pub struct PurchaseListResponse {
    pub purchases: Vec<Purchase>,
}

// -- PayStation --

/// Body sent to the merchant API when requesting a payment UI token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaystationTokenRequest {
    pub user: PaystationUser,
    pub settings: PaystationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaystationUser {
    pub id: PaystationValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaystationValue {
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaystationSettings {
    pub project_id: u64,
}

impl PaystationTokenRequest {
    pub fn for_user(user_id: impl Into<String>, project_id: u64) -> Self {
        Self {
            user: PaystationUser {
                id: PaystationValue {
                    value: user_id.into(),
                },
            },
            settings: PaystationSettings { project_id },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PaystationTokenResponse {
    pub token: Option<String>,
}

// -- Login tokens --

/// The verifier accepts the token from either a JSON or a form body.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerifyTokenResponse {
    Payload { token_payload: serde_json::Value },
    Verified { verified: bool },
}
