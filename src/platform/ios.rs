use super::{manifest, WidgetHost};
use crate::error::AppError;
use crate::widget::{WidgetInstanceId, WidgetViewModel};
use directories::ProjectDirs;
use log::warn;
use std::path::PathBuf;

/// iOS adapter: hands bindings to the WidgetKit shim.
///
/// The widget extension runs in its own process and can only see files in
/// the shared app-group container, so the embedding layer should construct
/// this host with that container via `with_bridge_dir`.
pub struct IosWidgetHost {
    bridge_dir: PathBuf,
}

impl Default for IosWidgetHost {
    fn default() -> Self {
        Self::new()
    }
}

impl IosWidgetHost {
    pub fn new() -> Self {
        let bridge_dir = ProjectDirs::from("me", "rahulrajsb", "FocusQuest")
            .map(|dirs| dirs.data_dir().join("widget-bridge"))
            .unwrap_or_else(|| {
                warn!("Could not determine app data directory, using temp dir for widget bridge");
                std::env::temp_dir().join("focusquest-widget-bridge")
            });
        Self { bridge_dir }
    }

    /// Use the shared app-group container supplied by the embedding layer.
    pub fn with_bridge_dir(bridge_dir: PathBuf) -> Self {
        Self { bridge_dir }
    }
}

impl WidgetHost for IosWidgetHost {
    fn update_widget(&self, id: WidgetInstanceId, view: &WidgetViewModel) -> Result<(), AppError> {
        manifest::write_binding(&self.bridge_dir, id, view)
    }
}
