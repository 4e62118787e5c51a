use crate::constants::HEATMAP_IMAGE_KEY;
use crate::error::AppError;
use crate::store::WidgetStore;
use std::path::Path;

/// Reference to the pre-rendered heatmap image, as held in the shared store.
///
/// The path may point at a file that no longer exists; consumers check
/// existence on every read instead of trusting the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapImage {
    pub path: String,
    pub published_at: i64,
}

impl HeatmapImage {
    /// Write a new image reference into the shared store. The caller has
    /// already validated the path; the previous reference is replaced.
    pub fn publish(store: &WidgetStore, path: &str) -> Result<Self, AppError> {
        store.set(HEATMAP_IMAGE_KEY, path)?;
        Self::current(store)?.ok_or(AppError::NotFound {
            entity: "Heatmap image",
        })
    }

    /// Read the current image reference, if one has ever been published.
    pub fn current(store: &WidgetStore) -> Result<Option<Self>, AppError> {
        let entry = store.get_entry(HEATMAP_IMAGE_KEY)?;
        Ok(entry.map(|e| Self {
            path: e.value,
            published_at: e.updated_at,
        }))
    }

    /// Whether the referenced file currently exists on disk.
    pub fn exists(&self) -> bool {
        Path::new(&self.path).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::test_utils::{setup_test_db, write_test_png};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn setup_store() -> (WidgetStore, TempDir) {
        let (db, dir) = setup_test_db();
        let db: Arc<Mutex<Database>> = Arc::new(Mutex::new(db));
        (WidgetStore::new(db), dir)
    }

    #[test]
    fn test_current_returns_none_before_first_publish() {
        let (store, _dir) = setup_store();
        assert!(HeatmapImage::current(&store).unwrap().is_none());
    }

    #[test]
    fn test_publish_and_read_back() {
        let (store, _dir) = setup_store();

        let published = HeatmapImage::publish(&store, "/data/heatmap.png").unwrap();
        assert_eq!(published.path, "/data/heatmap.png");
        assert!(published.published_at > 0);

        let current = HeatmapImage::current(&store).unwrap().unwrap();
        assert_eq!(current, published);
    }

    #[test]
    fn test_publish_replaces_previous_reference() {
        let (store, _dir) = setup_store();

        HeatmapImage::publish(&store, "/data/old.png").unwrap();
        HeatmapImage::publish(&store, "/data/new.png").unwrap();

        let current = HeatmapImage::current(&store).unwrap().unwrap();
        assert_eq!(current.path, "/data/new.png");
    }

    #[test]
    fn test_exists_reflects_filesystem() {
        let (store, dir) = setup_store();

        let png = write_test_png(dir.path(), "heatmap.png");
        let good = HeatmapImage::publish(&store, &png.to_string_lossy()).unwrap();
        assert!(good.exists());

        let dangling = HeatmapImage::publish(&store, "/data/missing.png").unwrap();
        assert!(!dangling.exists());
    }
}
