//! String key/value storage contract and implementations.
//!
//! # Responsibility
//! - Mirror the browser local-storage surface (`getItem`/`setItem`/`removeItem`).
//! - Keep SQL details out of the note store.
//!
//! # Invariants
//! - `set_item` fully replaces any previous value under the key.
//! - Reading an absent key is `Ok(None)`, never an error.

use super::{DbError, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

/// Blocking string key/value store.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> DbResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> DbResult<()>;
    fn remove_item(&mut self, key: &str) -> DbResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> DbResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> DbResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> DbResult<()> {
        (**self).remove_item(key)
    }
}

/// Process-local store; contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    items: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> DbResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> DbResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// SQLite-backed store over the `kv_items` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the connection skipped `open_db*`.
    pub fn try_new(conn: &'conn Connection) -> DbResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'kv_items'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(DbError::MissingRequiredTable("kv_items"));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get_item(&self, key: &str) -> DbResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_items WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            "INSERT INTO kv_items (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> DbResult<()> {
        self.conn
            .execute("DELETE FROM kv_items WHERE key = ?1;", [key])?;
        Ok(())
    }
}
