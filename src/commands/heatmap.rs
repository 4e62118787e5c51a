use crate::db::Database;
use crate::models::HeatmapImage;
use crate::platform::WidgetHost;
use crate::refresher;
use crate::store::WidgetStore;
use crate::validation::validate_image_path;
use std::sync::{Arc, Mutex};
use tauri::State;

use super::HeatmapImageResponse;

#[tauri::command]
pub fn publish_heatmap_image(
    db: State<Arc<Mutex<Database>>>,
    store: State<WidgetStore>,
    host: State<Arc<dyn WidgetHost>>,
    path: String,
) -> Result<HeatmapImageResponse, String> {
    validate_image_path(&path)?;
    let image = HeatmapImage::publish(&store, &path).map_err(String::from)?;

    // Rebind placed widgets right away instead of waiting for the next
    // refresh service tick; a failure here leaves them one tick stale.
    if let Err(e) = refresher::refresh_all(&db, &store, host.as_ref()) {
        log::warn!("widget refresh after publish failed: {e}");
    }

    Ok(HeatmapImageResponse::from(image))
}

#[tauri::command]
pub fn get_heatmap_image(
    store: State<WidgetStore>,
) -> Result<Option<HeatmapImageResponse>, String> {
    let image = HeatmapImage::current(&store).map_err(String::from)?;
    Ok(image.map(HeatmapImageResponse::from))
}
