use crate::error::AppError;
use crate::widget::{WidgetInstanceId, WidgetViewModel};

/// Submission seam to the OS widget host.
///
/// One operation: hand a finished view binding to the host for one widget
/// instance. Adapters stay thin - all store reads, existence checks, and
/// decoding happen before this point, in the portable refresh path.
pub trait WidgetHost: Send + Sync {
    fn update_widget(&self, id: WidgetInstanceId, view: &WidgetViewModel) -> Result<(), AppError>;
}
