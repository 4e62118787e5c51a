use crate::constants::{KIND_HEATMAP, KIND_HEATMAP_CONTROL, KIND_HEATMAP_LIVE_ACTIVITY};
use serde::Serialize;

/// Surface family a widget kind renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetFamily {
    /// Standard home-screen widget, periodically refreshed by the host.
    Static,
    /// Control-center quick-control surface.
    Control,
    /// Ongoing-activity surface (lock screen / dynamic island).
    LiveActivity,
}

impl WidgetFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetFamily::Static => "static",
            WidgetFamily::Control => "control",
            WidgetFamily::LiveActivity => "live_activity",
        }
    }
}

/// One widget kind the application offers to the OS widget host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WidgetKind {
    pub kind: &'static str,
    pub family: WidgetFamily,
}

/// The kinds FocusQuest exposes. Declarative and fixed: the OS host queries
/// this once at process start and drives each kind's refresh independently.
const KINDS: [WidgetKind; 3] = [
    WidgetKind {
        kind: KIND_HEATMAP,
        family: WidgetFamily::Static,
    },
    WidgetKind {
        kind: KIND_HEATMAP_CONTROL,
        family: WidgetFamily::Control,
    },
    WidgetKind {
        kind: KIND_HEATMAP_LIVE_ACTIVITY,
        family: WidgetFamily::LiveActivity,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct WidgetBundle {
    kinds: &'static [WidgetKind],
}

impl WidgetBundle {
    pub fn focusquest() -> Self {
        Self { kinds: &KINDS }
    }

    pub fn kinds(&self) -> &'static [WidgetKind] {
        self.kinds
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.iter().any(|k| k.kind == kind)
    }
}

impl Default for WidgetBundle {
    fn default() -> Self {
        Self::focusquest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_exposes_exactly_three_kinds() {
        let bundle = WidgetBundle::focusquest();
        assert_eq!(bundle.kinds().len(), 3);
    }

    #[test]
    fn test_kind_strings_are_unique() {
        let bundle = WidgetBundle::focusquest();
        let kinds = bundle.kinds();
        for (i, a) in kinds.iter().enumerate() {
            for b in kinds.iter().skip(i + 1) {
                assert_ne!(a.kind, b.kind);
            }
        }
    }

    #[test]
    fn test_declared_families() {
        let bundle = WidgetBundle::focusquest();
        let families: Vec<WidgetFamily> = bundle.kinds().iter().map(|k| k.family).collect();
        assert_eq!(
            families,
            vec![
                WidgetFamily::Static,
                WidgetFamily::Control,
                WidgetFamily::LiveActivity
            ]
        );
    }

    #[test]
    fn test_contains() {
        let bundle = WidgetBundle::focusquest();
        assert!(bundle.contains("heatmap"));
        assert!(bundle.contains("heatmap_control"));
        assert!(bundle.contains("heatmap_live_activity"));
        assert!(!bundle.contains("weather"));
    }

    #[test]
    fn test_declaration_is_stable() {
        // Two evaluations of the bundle describe the same kinds in the same order
        let a = WidgetBundle::focusquest();
        let b = WidgetBundle::focusquest();
        assert_eq!(a.kinds(), b.kinds());
    }
}
