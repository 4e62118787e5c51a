// src/constants.rs

/// Shared store key holding the absolute path of the pre-rendered heatmap image
pub const HEATMAP_IMAGE_KEY: &str = "activity_heatmap_image";

/// Maximum accepted length of a published image path
pub const MAX_IMAGE_PATH_LEN: usize = 4096;

/// Maximum length of a shared store key
pub const MAX_STORE_KEY_LEN: usize = 128;

/// Kind string of the static home-screen heatmap widget
pub const KIND_HEATMAP: &str = "heatmap";

/// Kind string of the control-center widget
pub const KIND_HEATMAP_CONTROL: &str = "heatmap_control";

/// Kind string of the live-activity widget
pub const KIND_HEATMAP_LIVE_ACTIVITY: &str = "heatmap_live_activity";
