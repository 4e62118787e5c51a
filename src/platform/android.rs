use super::{manifest, WidgetHost};
use crate::error::AppError;
use crate::widget::{WidgetInstanceId, WidgetViewModel};
use directories::ProjectDirs;
use log::warn;
use std::path::PathBuf;

/// Android adapter: hands bindings to the AppWidget shim.
///
/// The Kotlin side owns RemoteViews and AppWidgetManager; this side only
/// places finished bindings where the shim picks them up on its next
/// onUpdate pass.
pub struct AndroidWidgetHost {
    bridge_dir: PathBuf,
}

impl Default for AndroidWidgetHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AndroidWidgetHost {
    pub fn new() -> Self {
        let bridge_dir = ProjectDirs::from("me", "rahulrajsb", "FocusQuest")
            .map(|dirs| dirs.data_dir().join("widget-bridge"))
            .unwrap_or_else(|| {
                warn!("Could not determine app data directory, using temp dir for widget bridge");
                std::env::temp_dir().join("focusquest-widget-bridge")
            });
        Self { bridge_dir }
    }

    /// Use an explicit bridge directory supplied by the embedding layer.
    pub fn with_bridge_dir(bridge_dir: PathBuf) -> Self {
        Self { bridge_dir }
    }
}

impl WidgetHost for AndroidWidgetHost {
    fn update_widget(&self, id: WidgetInstanceId, view: &WidgetViewModel) -> Result<(), AppError> {
        manifest::write_binding(&self.bridge_dir, id, view)
    }
}
