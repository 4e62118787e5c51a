pub mod bundle;
pub mod refresh;
pub mod types;

pub use bundle::{WidgetBundle, WidgetFamily, WidgetKind};
pub use refresh::{RefreshHandler, RefreshOutcome};
pub use types::{UpdateEvent, WidgetInstanceId, WidgetViewModel};
