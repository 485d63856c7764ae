//! Store row types. Distinct from tally-types models so the wire shape can
//! change without touching the schema.
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use tally_types::models::Purchase;

pub struct UserRow {
    pub id: String,
    pub email: Option<String>,
    pub password: Option<String>,
    pub created_at: String,
}

pub struct PurchaseRow {
    pub transaction_id: String,
    pub user_id: String,
    pub notification_type: String,
    pub seen: bool,
    pub received_at: String,
}

impl PurchaseRow {
    pub fn into_purchase(self) -> Purchase {
        // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
        let received_at = NaiveDateTime::parse_from_str(&self.received_at, "%Y-%m-%d %H:%M:%S")
            .map(|ndt| ndt.and_utc())
            .unwrap_or_else(|e| {
                warn!(
                    "Corrupt received_at '{}' on purchase '{}': {}",
                    self.received_at, self.transaction_id, e
                );
                DateTime::<Utc>::default()
            });

        Purchase {
            transaction_id: self.transaction_id,
            user_id: self.user_id,
            notification_type: self.notification_type,
            seen: self.seen,
            received_at,
        }
    }
}
