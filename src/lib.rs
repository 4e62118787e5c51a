mod commands;
pub mod constants;
pub mod db;
pub mod error;
pub mod heatmap;
pub mod models;
pub mod native_bridge;
pub mod platform;
pub mod refresher;
pub mod store;
#[cfg(test)]
mod test_utils;
pub mod validation;
pub mod widget;

use crate::db::{migrations, Database};
use crate::platform::{NativeWidgetHost, WidgetHost};
use crate::refresher::{RefreshConfig, RefreshService};
use crate::store::WidgetStore;
use crate::widget::WidgetBundle;
use directories::ProjectDirs;
use log::{error, warn};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    webview::WebviewWindowBuilder,
    tray::TrayIconBuilder,
    AppHandle, Manager, RunEvent,
};

/// Holds the refresh service thread handle for graceful shutdown
pub struct RefreshHandle(Mutex<Option<JoinHandle<()>>>);

/// Error type for FocusQuest initialization failures
#[derive(Debug)]
pub enum InitError {
    NoProjectDirs,
    DataDirCreation(std::io::Error),
    DatabaseOpen(rusqlite::Error),
    Migration(rusqlite::Error),
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::NoProjectDirs => write!(f, "Could not determine project directories"),
            InitError::DataDirCreation(e) => write!(f, "Could not create data directory: {e}"),
            InitError::DatabaseOpen(e) => write!(f, "Failed to open database: {e}"),
            InitError::Migration(e) => write!(f, "Failed to run database migrations: {e}"),
        }
    }
}

impl std::error::Error for InitError {}

fn get_db_path() -> Result<std::path::PathBuf, InitError> {
    let proj_dirs =
        ProjectDirs::from("me", "rahulrajsb", "FocusQuest").ok_or(InitError::NoProjectDirs)?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir).map_err(InitError::DataDirCreation)?;
    Ok(data_dir.join("focusquest.db"))
}

/// Refresh every placed widget from the tray, logging instead of surfacing
/// errors - the tray has no error UI.
fn refresh_from_tray(app: &AppHandle) {
    let (Some(db), Some(store), Some(host)) = (
        app.try_state::<Arc<Mutex<Database>>>(),
        app.try_state::<WidgetStore>(),
        app.try_state::<Arc<dyn WidgetHost>>(),
    ) else {
        warn!("Widget state not initialized, skipping tray refresh");
        return;
    };

    match refresher::refresh_all(&db, &store, host.as_ref()) {
        Ok(outcome) => {
            log::info!(
                "Tray refresh: {} widget(s) updated, {} with image",
                outcome.processed,
                outcome.bound
            );
        }
        Err(e) => error!("Tray refresh failed: {e}"),
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Initialize database with proper error handling
            let db_path = match get_db_path() {
                Ok(path) => path,
                Err(e) => {
                    error!("FocusQuest initialization failed: {e}");
                    return Err(Box::new(e) as Box<dyn std::error::Error>);
                }
            };

            let db = match Database::open(&db_path) {
                Ok(db) => db,
                Err(e) => {
                    error!("Failed to open database: {e}");
                    return Err(Box::new(InitError::DatabaseOpen(e)) as Box<dyn std::error::Error>);
                }
            };

            if let Err(e) = migrations::run(db.connection()) {
                error!("Failed to run migrations: {e}");
                return Err(Box::new(InitError::Migration(e)) as Box<dyn std::error::Error>);
            }

            let db = Arc::new(Mutex::new(db));
            let store = WidgetStore::new(Arc::clone(&db));
            let host: Arc<dyn WidgetHost> = Arc::new(NativeWidgetHost::new());
            let bundle = WidgetBundle::focusquest();

            // Start refresh service
            let refresh_service = RefreshService::new(
                Arc::clone(&db),
                store.clone(),
                Arc::clone(&host),
                RefreshConfig::default(),
            );
            let handle = refresh_service.start();
            let refresh_service = Arc::new(refresh_service);
            let refresh_handle = RefreshHandle(Mutex::new(Some(handle)));

            // Store in app state
            app.manage(db);
            app.manage(store);
            app.manage(host);
            app.manage(bundle);
            app.manage(refresh_service);
            app.manage(refresh_handle);

            // Create main window at startup (hidden)
            let _main_window = WebviewWindowBuilder::new(app, "main", tauri::WebviewUrl::default())
                .title("FocusQuest")
                .inner_size(420.0, 600.0)
                .resizable(true)
                .visible(false)
                .center()
                .build()?;

            // Setup tray
            let open = MenuItem::with_id(app, "open", "Open FocusQuest", true, None::<&str>)?;
            let separator = PredefinedMenuItem::separator(app)?;
            let refresh =
                MenuItem::with_id(app, "refresh_widgets", "Refresh Widgets", true, None::<&str>)?;
            let quit = MenuItem::with_id(app, "quit", "Quit FocusQuest", true, None::<&str>)?;
            let menu = Menu::with_items(app, &[&open, &separator, &refresh, &separator, &quit])?;

            let _tray = TrayIconBuilder::new()
                .menu(&menu)
                .show_menu_on_left_click(true)
                .tooltip("FocusQuest")
                .on_menu_event(|app, event| {
                    let event_id = event.id.0.as_str();

                    if event_id == "refresh_widgets" {
                        refresh_from_tray(app);
                    } else if event_id == "open" {
                        // Show the main window
                        if let Some(window) = app.get_webview_window("main") {
                            let _ = window.show();
                            let _ = window.set_focus();
                        }
                    } else if event_id == "quit" {
                        // Gracefully stop the refresh service before exiting
                        if let Some(service) = app.try_state::<Arc<RefreshService>>() {
                            service.stop();
                        }
                        if let Some(handle_state) = app.try_state::<RefreshHandle>() {
                            if let Ok(mut guard) = handle_state.0.lock() {
                                if let Some(handle) = guard.take() {
                                    // Wait for the refresh thread to finish its tick
                                    let _ = handle.join();
                                }
                            }
                        }
                        app.exit(0);
                    }
                })
                .build(app)?;

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::publish_heatmap_image,
            commands::get_heatmap_image,
            commands::refresh_widgets,
            commands::get_widget_kinds,
            commands::get_widget_instances,
            commands::register_widget_instance,
            commands::unregister_widget_instance,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app, event| {
            // Prevent the app from exiting when all windows are closed
            // This is essential for tray-only apps
            if let RunEvent::ExitRequested { api, .. } = event {
                api.prevent_exit();
            }
        });
}
