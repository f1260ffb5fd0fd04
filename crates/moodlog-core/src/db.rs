//! SQLite-backed state storage
//!
//! The journal persists as two JSON blobs in a single key/value table: one
//! for the entry list, one for the user stats (achievement catalog included).

use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use thiserror::Error;

/// Key under which the serialized entry list is stored.
pub const ENTRIES_KEY: &str = "entries";
/// Key under which the serialized user stats are stored.
pub const STATS_KEY: &str = "stats";

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Open the default database
    pub fn open_default() -> Result<Self> {
        Self::open(crate::db_path())
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }

    /// Load the blob stored under `key`, if any
    pub fn load(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM state WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DbError::from(e)),
        }
    }

    /// Store `value` under `key`, replacing any previous blob
    pub fn save(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().timestamp();

        self.conn.execute(
            r#"
            INSERT INTO state (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value, now],
        )?;

        Ok(())
    }

    /// Delete the blob stored under `key`
    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM state WHERE key = ?1", params![key])?;
        Ok(())
    }
}
