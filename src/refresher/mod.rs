use crate::db::Database;
use crate::error::AppError;
use crate::heatmap::FileDecoder;
use crate::models::WidgetInstance;
use crate::platform::WidgetHost;
use crate::store::WidgetStore;
use crate::widget::{RefreshHandler, RefreshOutcome, UpdateEvent};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct RefreshConfig {
    pub poll_interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
        }
    }
}

/// Refresh every registered widget instance from current store contents.
pub fn refresh_all(
    db: &Arc<Mutex<Database>>,
    store: &WidgetStore,
    host: &dyn WidgetHost,
) -> Result<RefreshOutcome, AppError> {
    let widget_ids = {
        let db = db.lock().map_err(|_| AppError::LockPoisoned)?;
        WidgetInstance::find_all(db.connection())?
            .into_iter()
            .map(|w| w.id)
            .collect()
    };

    let handler = RefreshHandler::new(store, &FileDecoder, host);
    Ok(handler.handle(&UpdateEvent::new(widget_ids)))
}

/// Background worker that watches the shared store revision and rebinds all
/// registered widget instances whenever the host app publishes new state.
pub struct RefreshService {
    config: RefreshConfig,
    running: Arc<AtomicBool>,
    db: Arc<Mutex<Database>>,
    store: WidgetStore,
    host: Arc<dyn WidgetHost>,
}

impl RefreshService {
    pub fn new(
        db: Arc<Mutex<Database>>,
        store: WidgetStore,
        host: Arc<dyn WidgetHost>,
        config: RefreshConfig,
    ) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            db,
            store,
            host,
        }
    }

    pub fn start(&self) -> thread::JoinHandle<()> {
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let db = Arc::clone(&self.db);
        let store = self.store.clone();
        let host = Arc::clone(&self.host);
        let poll_interval = self.config.poll_interval;

        thread::spawn(move || {
            // Forces an initial pass so widgets placed while the app was not
            // running are bound on the first tick
            let mut last_revision = -1i64;

            while running.load(Ordering::SeqCst) {
                match store.revision() {
                    Ok(revision) if revision != last_revision => {
                        last_revision = revision;
                        match refresh_all(&db, &store, host.as_ref()) {
                            Ok(outcome) if outcome.processed > 0 => {
                                info!(
                                    "store revision {revision}: refreshed {} widget(s), {} with image",
                                    outcome.processed, outcome.bound
                                );
                            }
                            Ok(_) => {}
                            Err(e) => warn!("widget refresh failed: {e}"),
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!("failed to read store revision: {e}"),
                }

                thread::sleep(poll_interval);
            }
        })
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HEATMAP_IMAGE_KEY;
    use crate::platform::in_process::InProcessWidgetHost;
    use crate::test_utils::{setup_test_db, write_test_png};
    use tempfile::TempDir;

    fn setup() -> (Arc<Mutex<Database>>, WidgetStore, TempDir) {
        let (db, dir) = setup_test_db();
        let db = Arc::new(Mutex::new(db));
        let store = WidgetStore::new(Arc::clone(&db));
        (db, store, dir)
    }

    #[test]
    fn test_refresh_all_with_no_instances() {
        let (db, store, _dir) = setup();
        let host = InProcessWidgetHost::new();

        let outcome = refresh_all(&db, &store, &host).unwrap();

        assert_eq!(outcome, RefreshOutcome::default());
        assert_eq!(host.update_count(), 0);
    }

    #[test]
    fn test_refresh_all_covers_registered_instances() {
        let (db, store, dir) = setup();
        {
            let db = db.lock().unwrap();
            WidgetInstance::new(1, "heatmap").register(db.connection()).unwrap();
            WidgetInstance::new(2, "heatmap").register(db.connection()).unwrap();
        }
        let png = write_test_png(dir.path(), "heatmap.png");
        store.set(HEATMAP_IMAGE_KEY, &png.to_string_lossy()).unwrap();
        let host = InProcessWidgetHost::new();

        let outcome = refresh_all(&db, &store, &host).unwrap();

        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.bound, 2);
        assert!(host.binding(1).unwrap().has_image());
        assert!(host.binding(2).unwrap().has_image());
    }

    #[test]
    fn test_service_starts_and_stops() {
        let (db, store, _dir) = setup();
        let host: Arc<InProcessWidgetHost> = Arc::new(InProcessWidgetHost::new());
        let config = RefreshConfig {
            poll_interval: Duration::from_millis(20),
        };

        let service = RefreshService::new(db, store, host, config);

        assert!(!service.is_running());

        let handle = service.start();
        assert!(service.is_running());

        thread::sleep(Duration::from_millis(60));

        service.stop();
        handle.join().unwrap();

        assert!(!service.is_running());
    }

    #[test]
    fn test_service_rebinds_on_revision_bump() {
        let (db, store, dir) = setup();
        {
            let db = db.lock().unwrap();
            WidgetInstance::new(1, "heatmap").register(db.connection()).unwrap();
        }
        let host: Arc<InProcessWidgetHost> = Arc::new(InProcessWidgetHost::new());
        let config = RefreshConfig {
            poll_interval: Duration::from_millis(20),
        };
        let service = RefreshService::new(
            Arc::clone(&db),
            store.clone(),
            Arc::clone(&host) as Arc<dyn WidgetHost>,
            config,
        );

        let handle = service.start();

        // First tick binds with no image
        thread::sleep(Duration::from_millis(60));
        let before = host.update_count();
        assert!(before >= 1);
        assert!(!host.binding(1).unwrap().has_image());

        // Publishing bumps the revision; the service rebinds with the image
        let png = write_test_png(dir.path(), "heatmap.png");
        store.set(HEATMAP_IMAGE_KEY, &png.to_string_lossy()).unwrap();
        thread::sleep(Duration::from_millis(120));

        assert!(host.update_count() > before);
        assert!(host.binding(1).unwrap().has_image());

        service.stop();
        handle.join().unwrap();
    }
}
