use rusqlite::{params, Connection, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// A widget instance the OS widget host has placed, tracked so the host app
/// can refresh every instance outside an OS-delivered update event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetInstance {
    pub id: i64,
    pub kind: String,
    pub registered_at: i64,
}

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

impl WidgetInstance {
    pub fn new(id: i64, kind: &str) -> Self {
        Self {
            id,
            kind: kind.to_string(),
            registered_at: current_timestamp(),
        }
    }

    /// Record this instance. The id is host-assigned, so re-registering an
    /// existing id replaces the previous row instead of duplicating it.
    pub fn register(&self, conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO widget_instances (id, kind, registered_at)
             VALUES (?1, ?2, ?3)",
            params![self.id, self.kind, self.registered_at],
        )?;
        Ok(())
    }

    pub fn find_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn
            .prepare("SELECT id, kind, registered_at FROM widget_instances ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(Self {
                id: row.get(0)?,
                kind: row.get(1)?,
                registered_at: row.get(2)?,
            })
        })?;

        rows.collect()
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn
            .prepare("SELECT id, kind, registered_at FROM widget_instances WHERE id = ?1")?;

        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(Self {
                id: row.get(0)?,
                kind: row.get(1)?,
                registered_at: row.get(2)?,
            }))
        } else {
            Ok(None)
        }
    }

    /// Remove an instance. Returns whether a row was deleted.
    pub fn remove(conn: &Connection, id: i64) -> Result<bool> {
        let changed = conn.execute("DELETE FROM widget_instances WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}
