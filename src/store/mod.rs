//! Shared widget store.
//!
//! A key-value handoff between the host application process and the widget
//! surfaces. The host writes entries (at minimum the heatmap image path);
//! widget refresh logic reads them through the narrow [`StoreReader`]
//! capability and never mutates them.

use crate::db::Database;
use crate::error::AppError;
use crate::validation::validate_store_key;
use log::warn;
use rusqlite::{params, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

/// A single store entry plus its write metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    pub value: String,
    pub updated_at: i64,
    pub revision: i64,
}

/// Read-only capability over the shared store.
///
/// The refresh path takes this instead of the full store so missing data can
/// never become an error and tests need no real database behind it.
pub trait StoreReader: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// SQLite-backed shared store, written by the host app and read by widget
/// surfaces. Every write bumps a store-wide revision so refresh machinery
/// can detect changes without comparing values.
#[derive(Clone)]
pub struct WidgetStore {
    db: Arc<Mutex<Database>>,
}

impl WidgetStore {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    fn lock_db(&self) -> MutexGuard<'_, Database> {
        match self.db.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("WidgetStore: database mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        validate_store_key(key)?;
        let db = self.lock_db();
        db.connection().execute(
            "INSERT INTO widget_store (key, value, updated_at, revision)
             VALUES (?1, ?2, ?3, (SELECT COALESCE(MAX(revision), 0) + 1 FROM widget_store))
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at,
                 revision = excluded.revision",
            params![key, value, current_timestamp()],
        )?;
        Ok(())
    }

    pub fn get_entry(&self, key: &str) -> Result<Option<StoreEntry>, AppError> {
        let db = self.lock_db();
        let entry = db
            .connection()
            .query_row(
                "SELECT value, updated_at, revision FROM widget_store WHERE key = ?1",
                params![key],
                |row| {
                    Ok(StoreEntry {
                        value: row.get(0)?,
                        updated_at: row.get(1)?,
                        revision: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    pub fn remove(&self, key: &str) -> Result<bool, AppError> {
        let db = self.lock_db();
        let changed = db
            .connection()
            .execute("DELETE FROM widget_store WHERE key = ?1", params![key])?;
        Ok(changed > 0)
    }

    /// Store-wide revision: the highest revision among all entries, 0 when
    /// the store is empty. Strictly increases with every `set`.
    pub fn revision(&self) -> Result<i64, AppError> {
        let db = self.lock_db();
        let revision: i64 = db.connection().query_row(
            "SELECT COALESCE(MAX(revision), 0) FROM widget_store",
            [],
            |row| row.get(0),
        )?;
        Ok(revision)
    }
}

impl StoreReader for WidgetStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.get_entry(key) {
            Ok(entry) => entry.map(|e| e.value),
            Err(e) => {
                // A read failure degrades to "no value" - the refresh path
                // must never surface store errors.
                warn!("WidgetStore: failed to read key '{key}': {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    fn setup_store() -> (WidgetStore, tempfile::TempDir) {
        let (db, dir) = setup_test_db();
        (WidgetStore::new(Arc::new(Mutex::new(db))), dir)
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let (store, _dir) = setup_store();
        assert!(store.get_entry("activity_heatmap_image").unwrap().is_none());
        assert_eq!(store.get("activity_heatmap_image"), None);
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let (store, _dir) = setup_store();

        store
            .set("activity_heatmap_image", "/data/heatmap.png")
            .unwrap();

        let entry = store.get_entry("activity_heatmap_image").unwrap().unwrap();
        assert_eq!(entry.value, "/data/heatmap.png");
        assert!(entry.updated_at > 0);
        assert_eq!(entry.revision, 1);

        assert_eq!(
            store.get("activity_heatmap_image"),
            Some("/data/heatmap.png".to_string())
        );
    }

    #[test]
    fn test_set_overwrites_value() {
        let (store, _dir) = setup_store();

        store.set("activity_heatmap_image", "/data/old.png").unwrap();
        store.set("activity_heatmap_image", "/data/new.png").unwrap();

        let entry = store.get_entry("activity_heatmap_image").unwrap().unwrap();
        assert_eq!(entry.value, "/data/new.png");
    }

    #[test]
    fn test_revision_strictly_increases() {
        let (store, _dir) = setup_store();
        assert_eq!(store.revision().unwrap(), 0);

        store.set("a", "1").unwrap();
        assert_eq!(store.revision().unwrap(), 1);

        store.set("b", "2").unwrap();
        assert_eq!(store.revision().unwrap(), 2);

        // Overwriting an existing key still bumps the store revision
        store.set("a", "3").unwrap();
        assert_eq!(store.revision().unwrap(), 3);
    }

    #[test]
    fn test_set_rejects_invalid_key() {
        let (store, _dir) = setup_store();
        assert!(store.set("", "/data/heatmap.png").is_err());
        assert_eq!(store.revision().unwrap(), 0);
    }

    #[test]
    fn test_remove() {
        let (store, _dir) = setup_store();

        store.set("activity_heatmap_image", "/data/heatmap.png").unwrap();
        assert!(store.remove("activity_heatmap_image").unwrap());
        assert!(!store.remove("activity_heatmap_image").unwrap());
        assert_eq!(store.get("activity_heatmap_image"), None);
    }
}
