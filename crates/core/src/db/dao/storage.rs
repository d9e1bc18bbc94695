use std::sync::Arc;

use chrono::Utc;
use rusqlite::{OptionalExtension, params};

use crate::db::Database;
use crate::error::Result;

/// Which key/value area an item lives in.
///
/// `Local` survives across sessions and holds the game collection.
/// `Session` holds short-lived state such as the admin unlock flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Session,
}

impl StorageArea {
    fn table(&self) -> &'static str {
        match self {
            Self::Local => "local_storage",
            Self::Session => "session_storage",
        }
    }
}

/// String key/value access to one storage area.
#[derive(Clone, Debug)]
pub struct StorageDao {
    db: Arc<Database>,
    area: StorageArea,
}

impl StorageDao {
    pub fn new(db: Arc<Database>, area: StorageArea) -> Self {
        Self { db, area }
    }

    pub fn local(db: Arc<Database>) -> Self {
        Self::new(db, StorageArea::Local)
    }

    pub fn session(db: Arc<Database>) -> Self {
        Self::new(db, StorageArea::Session)
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.db.with_connection(|conn| {
            let sql = format!("SELECT value FROM {} WHERE key = ?1", self.area.table());
            let value = conn
                .query_row(&sql, params![key], |row| row.get(0))
                .optional()?;

            Ok(value)
        })
    }

    /// Insert or overwrite `key` with `value`.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.db.with_connection(|conn| {
            let sql = format!(
                "INSERT INTO {} (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                self.area.table()
            );
            conn.execute(&sql, params![key, value, Utc::now().to_rfc3339()])?;
            Ok(())
        })
    }

    /// Returns whether anything was removed.
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        self.db.with_connection(|conn| {
            let sql = format!("DELETE FROM {} WHERE key = ?1", self.area.table());
            let removed = conn.execute(&sql, params![key])?;
            Ok(removed > 0)
        })
    }
}
