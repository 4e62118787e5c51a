pub mod heatmap_image;
pub mod widget_instance;

pub use heatmap_image::HeatmapImage;
pub use widget_instance::WidgetInstance;
