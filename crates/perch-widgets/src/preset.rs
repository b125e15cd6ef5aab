#![forbid(unsafe_code)]

//! Per-widget placement presets.

use perch_core::geometry::Size;
use perch_layout::PlacementPreferences;

/// Solver preferences plus the size to assume before the panel renders.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PanelPreset {
    /// Solver settings.
    pub preferences: PlacementPreferences,
    /// Pre-render size estimate.
    pub estimate: Size,
}

impl Default for PanelPreset {
    fn default() -> Self {
        Self::dropdown()
    }
}

impl PanelPreset {
    /// Trigger-anchored dropdown menus.
    #[must_use]
    pub fn dropdown() -> Self {
        Self {
            preferences: PlacementPreferences::default(),
            estimate: Size::new(200.0, 300.0),
        }
    }

    /// Pointer-anchored context menus.
    #[must_use]
    pub fn context_menu() -> Self {
        Self {
            preferences: PlacementPreferences::default(),
            estimate: Size::new(180.0, 240.0),
        }
    }

    /// Overflow menu hanging off a tab bar.
    #[must_use]
    pub fn tab_overflow() -> Self {
        Self {
            preferences: PlacementPreferences::default()
                .viewport_padding(16.0)
                .gap(2.0),
            estimate: Size::new(220.0, 320.0),
        }
    }

    /// Replace the estimate.
    #[must_use]
    pub fn estimate(mut self, estimate: Size) -> Self {
        self.estimate = estimate;
        self
    }

    /// Replace the preferences.
    #[must_use]
    pub fn preferences(mut self, preferences: PlacementPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Validate; empty means valid.
    #[must_use]
    pub fn validate(&self, prefix: &str) -> Vec<String> {
        let mut errors = self.preferences.validate(&format!("{prefix}.preferences"));
        let Size { width, height } = self.estimate;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            errors.push(format!(
                "{prefix}.estimate must be positive and finite, got {width}x{height}"
            ));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_where_widgets_differ() {
        assert_eq!(PanelPreset::dropdown().estimate, Size::new(200.0, 300.0));
        assert_eq!(PanelPreset::context_menu().estimate, Size::new(180.0, 240.0));
        let tabs = PanelPreset::tab_overflow();
        assert_eq!(tabs.preferences.viewport_padding, 16.0);
        assert_eq!(tabs.preferences.gap, 2.0);
    }

    #[test]
    fn presets_validate_clean() {
        assert!(PanelPreset::dropdown().validate("dropdown").is_empty());
        assert!(PanelPreset::context_menu().validate("context_menu").is_empty());
        assert!(PanelPreset::tab_overflow().validate("tab_overflow").is_empty());
    }

    #[test]
    fn zero_estimate_is_rejected() {
        let errors = PanelPreset::dropdown()
            .estimate(Size::ZERO)
            .validate("dropdown");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("dropdown.estimate"));
    }
}
