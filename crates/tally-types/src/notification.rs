use std::fmt;

use serde::{Deserialize, Deserializer};

/// Webhook notification kinds the demo server knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    UserValidation,
    Payment,
    Refund,
}

impl NotificationKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user_validation" => Some(Self::UserValidation),
            "payment" => Some(Self::Payment),
            "refund" => Some(Self::Refund),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserValidation => "user_validation",
            Self::Payment => "payment",
            Self::Refund => "refund",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Missing notification_type")]
    MissingType,

    #[error("Unknown notification_type: {0}")]
    UnknownType(String),
}

/// A decoded webhook notification. Lives for the duration of one request.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub user_id: Option<String>,
    pub transaction_id: Option<String>,
    pub raw_body: Vec<u8>,
}

impl Notification {
    /// Decode a raw request body. Extra fields are ignored.
    pub fn decode(raw_body: &[u8]) -> Result<Self, NotificationError> {
        let payload: NotificationPayload = serde_json::from_slice(raw_body)?;

        let type_name = payload
            .notification_type
            .filter(|t| !t.is_empty())
            .ok_or(NotificationError::MissingType)?;
        let kind = NotificationKind::parse(&type_name)
            .ok_or(NotificationError::UnknownType(type_name))?;

        Ok(Self {
            kind,
            user_id: payload.user.and_then(|u| u.id).map(|id| id.0),
            transaction_id: payload.transaction.and_then(|t| t.id).map(|id| id.0),
            raw_body: raw_body.to_vec(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct NotificationPayload {
    notification_type: Option<String>,
    user: Option<IdHolder>,
    transaction: Option<IdHolder>,
}

#[derive(Debug, Deserialize)]
struct IdHolder {
    id: Option<OpaqueId>,
}

/// Identifier that may arrive as a JSON string or number.
#[derive(Debug)]
struct OpaqueId(String);

impl<'de> Deserialize<'de> for OpaqueId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Int(i64),
            UInt(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Str(s) => OpaqueId(s),
            Raw::Int(n) => OpaqueId(n.to_string()),
            Raw::UInt(n) => OpaqueId(n.to_string()),
        })
    }
}
