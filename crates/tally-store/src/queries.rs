use crate::Store;
use crate::models::{PurchaseRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Store {
    // -- Users --

    /// Insert a user. Returns `false` if the id is already taken.
    pub fn create_user(
        &self,
        id: &str,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO users (id, email, password) VALUES (?1, ?2, ?3)",
                rusqlite::params![id, email, password_hash],
            )?;
            Ok(inserted == 1)
        })
    }

    pub fn get_user(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, id))
    }

    pub fn user_exists(&self, id: &str) -> Result<bool> {
        Ok(self.get_user(id)?.is_some())
    }

    // -- Purchases --

    /// Record a purchase. Returns `false` if the transaction was already
    /// recorded, in which case the existing row is left untouched.
    pub fn record_purchase(
        &self,
        transaction_id: &str,
        user_id: &str,
        notification_type: &str,
    ) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO purchases (transaction_id, user_id, notification_type)
                 VALUES (?1, ?2, ?3)",
                (transaction_id, user_id, notification_type),
            )?;
            Ok(inserted == 1)
        })
    }

    pub fn get_purchase(&self, transaction_id: &str) -> Result<Option<PurchaseRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT transaction_id, user_id, notification_type, seen, received_at
                 FROM purchases WHERE transaction_id = ?1",
            )?;
            let row = stmt.query_row([transaction_id], purchase_from_row).optional()?;
            Ok(row)
        })
    }

    /// List a user's purchases as they are now, then mark all of them seen.
    pub fn take_purchases(&self, user_id: &str) -> Result<Vec<PurchaseRow>> {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            let rows = query_purchases(&tx, user_id)?;
            tx.execute(
                "UPDATE purchases SET seen = 1 WHERE user_id = ?1 AND seen = 0",
                [user_id],
            )?;
            tx.commit()?;
            Ok(rows)
        })
    }
}

fn query_user(conn: &Connection, id: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, email, password, created_at FROM users WHERE id = ?1")?;

    let row = stmt
        .query_row([id], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_purchases(conn: &Connection, user_id: &str) -> Result<Vec<PurchaseRow>> {
    let mut stmt = conn.prepare(
        "SELECT transaction_id, user_id, notification_type, seen, received_at
         FROM purchases
         WHERE user_id = ?1
         ORDER BY rowid ASC",
    )?;

    let rows = stmt
        .query_map([user_id], purchase_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn purchase_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PurchaseRow> {
    Ok(PurchaseRow {
        transaction_id: row.get(0)?,
        user_id: row.get(1)?,
        notification_type: row.get(2)?,
        seen: row.get(3)?,
        received_at: row.get(4)?,
    })
}
