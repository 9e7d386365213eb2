//! Local cache
//!
//! Best-effort persistence of small JSON values between sessions. Failures are
//! logged and swallowed: `put` becomes a no-op and `get` reports nothing.
//! Writers that need to tell the user get a `bool` back instead of an error.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::{Database, DbResult};
use crate::models::CacheEntry;

#[derive(Clone)]
pub struct LocalCache {
    database: Database,
}

impl LocalCache {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Store `value` under `key`, replacing any previous value. Returns
    /// whether the value was stored.
    pub fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_put(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to save to local cache");
                false
            }
        }
    }

    /// Read the value stored under `key`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to read from local cache");
                None
            }
        }
    }

    /// Drop the value stored under `key`. Returns whether a value was removed.
    pub fn remove(&self, key: &str) -> bool {
        match self.database.with_conn(|conn| CacheEntry::delete(conn, key)) {
            Ok(existed) => existed,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to remove from local cache");
                false
            }
        }
    }

    fn try_put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let json = serde_json::to_string(value)?;
        self.database.with_conn(|conn| CacheEntry::upsert(conn, key, &json))
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        let entry = self.database.with_conn(|conn| CacheEntry::get(conn, key))?;
        match entry {
            Some(entry) => Ok(Some(serde_json::from_str(&entry.value)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use crate::db::migrations::run_migrations;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Units {
        weight: String,
        height: String,
    }

    fn cache(dir: &tempfile::TempDir) -> LocalCache {
        let database = Database::new(dir.path().join("cache.db")).unwrap();
        database.with_conn(run_migrations).unwrap();
        LocalCache::new(database)
    }

    #[test]
    fn test_round_trip_struct() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);

        let units = Units { weight: "lbs".into(), height: "ft".into() };
        assert!(cache.put("units", &units));
        assert_eq!(cache.get::<Units>("units"), Some(units));
    }

    #[test]
    fn test_missing_key_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);
        assert_eq!(cache.get::<Units>("nothing"), None);
    }

    #[test]
    fn test_corrupt_value_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);
        cache
            .database
            .with_conn(|conn| CacheEntry::upsert(conn, "units", "{not json"))
            .unwrap();

        assert_eq!(cache.get::<Units>("units"), None);
    }

    #[test]
    fn test_unserializable_value_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);

        // JSON object keys must be strings
        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], 1);
        assert!(!cache.put("bad", &bad));

        assert_eq!(cache.get::<serde_json::Value>("bad"), None);
    }

    #[test]
    fn test_missing_table_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let database = Database::new(dir.path().join("bare.db")).unwrap();
        let cache = LocalCache::new(database);

        assert!(!cache.put("units", &1));
        assert_eq!(cache.get::<i32>("units"), None);
        assert!(!cache.remove("units"));
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);
        assert!(cache.put("k", "v"));
        assert!(cache.remove("k"));
        assert_eq!(cache.get::<String>("k"), None);
        assert!(!cache.remove("k"));
    }
}
