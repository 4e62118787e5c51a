pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS widget_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL,
    revision INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS widget_instances (
    id INTEGER PRIMARY KEY,
    kind TEXT NOT NULL,
    registered_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_widget_instances_kind ON widget_instances(kind);
CREATE INDEX IF NOT EXISTS idx_widget_store_revision ON widget_store(revision);
";
