// src/commands/dtos.rs

use crate::models::{HeatmapImage, WidgetInstance};
use crate::widget::{RefreshOutcome, WidgetKind};
use serde::Serialize;

#[derive(Serialize)]
pub struct HeatmapImageResponse {
    pub path: String,
    pub published_at: i64,
    /// Whether the referenced file is currently on disk - a published path
    /// may be stale, and the UI shows that distinction.
    pub exists: bool,
}

impl From<HeatmapImage> for HeatmapImageResponse {
    fn from(image: HeatmapImage) -> Self {
        let exists = image.exists();
        Self {
            path: image.path,
            published_at: image.published_at,
            exists,
        }
    }
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub processed: usize,
    pub bound: usize,
}

impl From<RefreshOutcome> for RefreshResponse {
    fn from(outcome: RefreshOutcome) -> Self {
        Self {
            processed: outcome.processed,
            bound: outcome.bound,
        }
    }
}

#[derive(Serialize)]
pub struct WidgetKindResponse {
    pub kind: String,
    pub family: String,
}

impl From<WidgetKind> for WidgetKindResponse {
    fn from(kind: WidgetKind) -> Self {
        Self {
            kind: kind.kind.to_string(),
            family: kind.family.as_str().to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct WidgetInstanceResponse {
    pub id: i64,
    pub kind: String,
    pub registered_at: i64,
}

impl From<WidgetInstance> for WidgetInstanceResponse {
    fn from(instance: WidgetInstance) -> Self {
        Self {
            id: instance.id,
            kind: instance.kind,
            registered_at: instance.registered_at,
        }
    }
}
