use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Users every fresh store starts with.
pub const DEMO_USERS: &[&str] = &[
    "ladora@directmail.top",
    "d342dad2-9d59-11e9-a384-42010aa8003f",
    "test_user_1",
    "test_user_2",
];

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            email       TEXT,
            password    TEXT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS purchases (
            transaction_id      TEXT PRIMARY KEY,
            user_id             TEXT NOT NULL REFERENCES users(id),
            notification_type   TEXT NOT NULL,
            seen                INTEGER NOT NULL DEFAULT 0,
            received_at         TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_purchases_user
            ON purchases(user_id);
        ",
    )?;

    info!("Store migrations complete");
    Ok(())
}

/// Insert the demo users. Returns how many were newly inserted.
pub fn seed_demo_users(conn: &Connection) -> Result<usize> {
    let mut stmt = conn.prepare("INSERT OR IGNORE INTO users (id) VALUES (?1)")?;
    let mut inserted = 0;
    for id in DEMO_USERS {
        inserted += stmt.execute([id])?;
    }
    Ok(inserted)
}
