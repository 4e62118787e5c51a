//! Widget bridge host for FocusQuest
//!
//! This binary runs as a standalone bridge for the native widget shims.
//! The shim delivers update events and instance lifecycle notifications via
//! stdin/stdout using a length-prefixed JSON protocol.

use directories::ProjectDirs;
use focusquest_lib::{
    db::{migrations, Database},
    native_bridge::WidgetBridge,
    platform::{NativeWidgetHost, WidgetHost},
    store::WidgetStore,
};
use std::sync::{Arc, Mutex};

/// Get the database path, creating the data directory if needed.
fn get_db_path() -> Result<std::path::PathBuf, String> {
    let proj_dirs = ProjectDirs::from("me", "rahulrajsb", "FocusQuest")
        .ok_or_else(|| "Could not determine project directories".to_string())?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .map_err(|e| format!("Could not create data directory: {e}"))?;
    Ok(data_dir.join("focusquest.db"))
}

fn main() {
    // Initialize with proper error handling. Diagnostics go to stderr;
    // stdout carries the bridge protocol and must stay clean.
    let db_path = match get_db_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Initialization error: {e}");
            std::process::exit(1);
        }
    };

    let db = match Database::open(&db_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrations::run(db.connection()) {
        eprintln!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    let db = Arc::new(Mutex::new(db));
    let store = WidgetStore::new(Arc::clone(&db));
    let host: Arc<dyn WidgetHost> = Arc::new(NativeWidgetHost::new());

    let bridge = WidgetBridge::new(db, store, host);

    // Run the bridge event loop
    // This will read from stdin and write to stdout until the shim closes the connection
    if let Err(e) = bridge.run() {
        // Only report unexpected errors; EOF is expected when the shim disconnects
        if e.kind() != std::io::ErrorKind::UnexpectedEof {
            eprintln!("Widget bridge error: {e}");
            std::process::exit(1);
        }
    }
}
