//! Binding manifests: the on-disk handoff from the Rust core to the native
//! widget shims. Each submitted binding becomes a small JSON manifest plus,
//! when the image slot is set, a raw RGBA8 pixel file next to it. The native
//! layer (RemoteViews on Android, WidgetKit on iOS) reads these and performs
//! the actual view update; that side is owned by the platform frameworks.

use crate::error::AppError;
use crate::widget::{WidgetInstanceId, WidgetViewModel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingManifest {
    pub widget_id: WidgetInstanceId,
    /// Relative file name of the raw RGBA8 pixel dump, absent when the
    /// image slot is unset.
    pub pixels: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

fn manifest_path(dir: &Path, id: WidgetInstanceId) -> PathBuf {
    dir.join(format!("widget-{id}.json"))
}

fn pixels_name(id: WidgetInstanceId) -> String {
    format!("widget-{id}.rgba")
}

/// Write the manifest (and pixel file) for one binding. Stale pixel files
/// from a previous binding with an image are removed when the slot is unset,
/// so the native shim never renders outdated content.
pub fn write_binding(
    dir: &Path,
    id: WidgetInstanceId,
    view: &WidgetViewModel,
) -> Result<(), AppError> {
    fs::create_dir_all(dir)?;

    let manifest = match &view.heatmap {
        Some(bitmap) => {
            let name = pixels_name(id);
            fs::write(dir.join(&name), &bitmap.pixels)?;
            BindingManifest {
                widget_id: id,
                pixels: Some(name),
                width: Some(bitmap.width),
                height: Some(bitmap.height),
            }
        }
        None => {
            let stale = dir.join(pixels_name(id));
            if stale.exists() {
                fs::remove_file(stale)?;
            }
            BindingManifest {
                widget_id: id,
                pixels: None,
                width: None,
                height: None,
            }
        }
    };

    let json = serde_json::to_vec_pretty(&manifest)
        .map_err(|e| AppError::Internal(format!("failed to serialize binding manifest: {e}")))?;
    fs::write(manifest_path(dir, id), json)?;
    Ok(())
}

/// Read a previously written manifest, if any.
pub fn read_binding(dir: &Path, id: WidgetInstanceId) -> Result<Option<BindingManifest>, AppError> {
    let path = manifest_path(dir, id);
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    let manifest = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Internal(format!("failed to parse binding manifest: {e}")))?;
    Ok(Some(manifest))
}
