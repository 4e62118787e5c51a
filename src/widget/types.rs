use crate::heatmap::Bitmap;

/// Host-assigned identifier of one placed widget instance.
pub type WidgetInstanceId = i64;

/// An OS- or app-initiated request to refresh a set of widget instances.
/// May carry zero identifiers; the handler then does nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEvent {
    pub widget_ids: Vec<WidgetInstanceId>,
}

impl UpdateEvent {
    pub fn new(widget_ids: Vec<WidgetInstanceId>) -> Self {
        Self { widget_ids }
    }

    pub fn is_empty(&self) -> bool {
        self.widget_ids.is_empty()
    }
}

/// The view binding submitted to the widget host for one instance.
///
/// One image slot; unset means the widget shows its layout default. Derived
/// equality is bitwise (via [`Bitmap`]), which is what the idempotency
/// guarantee of the refresh handler is stated in terms of.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetViewModel {
    pub heatmap: Option<Bitmap>,
}

impl WidgetViewModel {
    pub fn has_image(&self) -> bool {
        self.heatmap.is_some()
    }
}
