//! Cache entry model
//!
//! One JSON document stored under a string key.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A stored key/value pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    /// Raw JSON text
    pub value: String,
    pub created_at: String,
    pub updated_at: String,
}

impl CacheEntry {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            key: row.get("key")?,
            value: row.get("value")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get an entry by key
    pub fn get(conn: &Connection, key: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM local_cache WHERE key = ?1")?;

        let result = stmt.query_row([key], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert or replace the value stored under `key`
    pub fn upsert(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO local_cache (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove an entry. Returns whether it existed.
    pub fn delete(conn: &Connection, key: &str) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM local_cache WHERE key = ?1", [key])?;
        Ok(rows > 0)
    }
}
