/*!
 * Key-value repository over the SQLite connection.
 *
 * Every value is JSON-encoded. Reads of a missing key return `None`, so
 * callers decide their own defaults.
 */

use log::{debug, warn};
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::connection::DatabaseConnection;
use crate::errors::StorageError;

/// Durable map of string keys to JSON values
#[derive(Clone, Debug)]
pub struct KeyValueStore {
    db: DatabaseConnection,
}

impl KeyValueStore {
    /// Wrap an open connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store backed by a fresh in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(DatabaseConnection::new_in_memory()?))
    }

    /// Underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Raw JSON text stored under `key`
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.db.execute(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    /// Decode the value stored under `key`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Decode the value under `key`, falling back to `T::default()` when it
    /// is missing or unreadable
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                warn!("Discarding unreadable value for '{}': {}", key, e);
                T::default()
            }
        }
    }

    /// Encode and store `value` under `key`, replacing any previous value
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.db.execute(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, raw],
            )?;
            Ok(())
        })?;
        debug!("Persisted '{}' ({} bytes)", key, raw.len());
        Ok(())
    }

    /// Store several values atomically
    pub fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        self.db.transaction(|tx| {
            for (key, raw) in entries {
                tx.execute(
                    "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    params![key, raw],
                )?;
            }
            Ok(())
        })
    }

    /// Delete `key`; returns whether it existed
    pub fn remove(&self, key: &str) -> Result<bool, StorageError> {
        self.db.execute(|conn| {
            let affected = conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
            Ok(affected > 0)
        })
    }

    /// All stored keys in lexical order
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.db.execute(|conn| {
            let mut stmt = conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
            let keys = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(keys)
        })
    }
}
