use super::WidgetHost;
use crate::error::AppError;
use crate::widget::{WidgetInstanceId, WidgetViewModel};
use log::debug;
use std::sync::Mutex;

/// In-process widget host for desktop development and tests.
///
/// Records every submitted binding instead of talking to an OS widget host,
/// which makes the refresh handler's call pattern directly observable.
#[derive(Default)]
pub struct InProcessWidgetHost {
    calls: Mutex<Vec<(WidgetInstanceId, WidgetViewModel)>>,
}

impl InProcessWidgetHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of update calls received.
    pub fn update_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// The most recent binding submitted for `id`, if any.
    pub fn binding(&self, id: WidgetInstanceId) -> Option<WidgetViewModel> {
        self.calls
            .lock()
            .ok()
            .and_then(|calls| calls.iter().rev().find(|(i, _)| *i == id).map(|(_, v)| v.clone()))
    }

    /// Every call in submission order.
    pub fn calls(&self) -> Vec<(WidgetInstanceId, WidgetViewModel)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl WidgetHost for InProcessWidgetHost {
    fn update_widget(&self, id: WidgetInstanceId, view: &WidgetViewModel) -> Result<(), AppError> {
        let mut calls = self.calls.lock().map_err(|_| AppError::LockPoisoned)?;
        calls.push((id, view.clone()));
        debug!("widget {id} bound (image: {})", view.has_image());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_bindings_in_order() {
        let host = InProcessWidgetHost::new();

        host.update_widget(2, &WidgetViewModel::default()).unwrap();
        host.update_widget(1, &WidgetViewModel::default()).unwrap();

        assert_eq!(host.update_count(), 2);
        let ids: Vec<i64> = host.calls().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_binding_returns_latest_for_id() {
        let host = InProcessWidgetHost::new();

        host.update_widget(4, &WidgetViewModel::default()).unwrap();
        assert!(host.binding(4).is_some());
        assert!(host.binding(5).is_none());
    }
}
