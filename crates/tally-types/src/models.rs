use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A payment recorded from a webhook notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub transaction_id: String,
    pub user_id: String,
    pub notification_type: String,
    pub seen: bool,
    pub received_at: DateTime<Utc>,
}
