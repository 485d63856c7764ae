pub mod migrations;
pub mod models;
pub mod queries;

use anyhow::Result;
use rusqlite::Connection;
use std::sync::Mutex;
use tracing::info;

/// In-memory mock store for demo users and purchases.
///
/// Nothing is persisted: the database lives as long as the process.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open an empty store with the demo users seeded.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;
        let seeded = migrations::seed_demo_users(&conn)?;

        info!("Demo users were inserted in the database ({} users)", seeded);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| anyhow::anyhow!("Store lock poisoned: {}", e))?;
        f(&conn)
    }
}
