#![forbid(unsafe_code)]

//! Placement configuration for all widgets.
//!
//! [`PerchConfig`] groups the per-widget presets and the controller tunables
//! so an application can ship them as data.
//!
//! ```toml
//! # perch.toml
//! [dropdown.estimate]
//! width = 240.0
//! height = 320.0
//!
//! [tab_overflow.preferences]
//! viewport_padding = 24.0
//!
//! [controller]
//! max_measure_frames = 4
//! ```
//!
//! ```rust,ignore
//! let config = PerchConfig::from_toml_file("perch.toml")?.validated()?;
//! let panel = config.panel(PanelKind::Dropdown, host, measure);
//! ```
//!
//! Every field is optional. A field left out keeps the value from that
//! widget's own preset, so the example above changes only the tab overflow
//! padding and leaves its 220x320 estimate and 2 px gap alone.

#[cfg(feature = "config")]
use std::path::Path;

use std::rc::Rc;

#[cfg(feature = "config")]
use perch_core::geometry::Size;
#[cfg(feature = "config")]
use perch_layout::PlacementPreferences;
use perch_runtime::{ControllerConfig, Host, Measure};

use crate::panel::FloatingPanel;
use crate::preset::PanelPreset;

/// Which widget a preset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    /// [`DropdownMenu`](crate::DropdownMenu), anchored to its trigger.
    Dropdown,
    /// [`ContextMenu`](crate::ContextMenu), anchored to the pointer.
    ContextMenu,
    /// [`TabOverflowMenu`](crate::TabOverflowMenu), anchored to the overflow
    /// trigger of a tab bar.
    TabOverflow,
}

/// Presets for every widget plus controller tunables.
///
/// Deserializing layers the document onto [`PerchConfig::default`] field
/// by field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
pub struct PerchConfig {
    /// Dropdown preset (default [`PanelPreset::dropdown`]).
    pub dropdown: PanelPreset,
    /// Context menu preset (default [`PanelPreset::context_menu`]).
    pub context_menu: PanelPreset,
    /// Tab overflow preset (default [`PanelPreset::tab_overflow`]).
    pub tab_overflow: PanelPreset,
    /// Tunables shared by every panel built from this config.
    pub controller: ControllerConfig,
}

impl Default for PerchConfig {
    fn default() -> Self {
        Self {
            dropdown: PanelPreset::dropdown(),
            context_menu: PanelPreset::context_menu(),
            tab_overflow: PanelPreset::tab_overflow(),
            controller: ControllerConfig::default(),
        }
    }
}

/// On-disk shape of [`PerchConfig`]: every leaf optional.
#[cfg(feature = "config")]
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    dropdown: PresetFile,
    context_menu: PresetFile,
    tab_overflow: PresetFile,
    controller: ControllerConfig,
}

#[cfg(feature = "config")]
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct PresetFile {
    preferences: PreferencesFile,
    estimate: Option<Size>,
}

#[cfg(feature = "config")]
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct PreferencesFile {
    viewport_padding: Option<f64>,
    gap: Option<f64>,
    allow_flip_vertical: Option<bool>,
    allow_flip_horizontal: Option<bool>,
}

#[cfg(feature = "config")]
impl PresetFile {
    fn layer_onto(self, base: PanelPreset) -> PanelPreset {
        let file = self.preferences;
        let prefs = base.preferences;
        PanelPreset {
            preferences: PlacementPreferences {
                viewport_padding: file.viewport_padding.unwrap_or(prefs.viewport_padding),
                gap: file.gap.unwrap_or(prefs.gap),
                allow_flip_vertical: file.allow_flip_vertical.unwrap_or(prefs.allow_flip_vertical),
                allow_flip_horizontal: file
                    .allow_flip_horizontal
                    .unwrap_or(prefs.allow_flip_horizontal),
            },
            estimate: self.estimate.unwrap_or(base.estimate),
        }
    }
}

#[cfg(feature = "config")]
impl<'de> serde::Deserialize<'de> for PerchConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let file = ConfigFile::deserialize(deserializer)?;
        let base = Self::default();
        Ok(Self {
            dropdown: file.dropdown.layer_onto(base.dropdown),
            context_menu: file.context_menu.layer_onto(base.context_menu),
            tab_overflow: file.tab_overflow.layer_onto(base.tab_overflow),
            controller: file.controller,
        })
    }
}

impl PerchConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty TOML.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.dropdown.validate("dropdown");
        errors.extend(self.context_menu.validate("context_menu"));
        errors.extend(self.tab_overflow.validate("tab_overflow"));
        errors.extend(self.controller.validate("controller"));
        errors
    }

    /// `self` if valid, otherwise [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub fn preset(&self, kind: PanelKind) -> PanelPreset {
        match kind {
            PanelKind::Dropdown => self.dropdown,
            PanelKind::ContextMenu => self.context_menu,
            PanelKind::TabOverflow => self.tab_overflow,
        }
    }

    /// A closed panel using this config's preset and controller tunables.
    pub fn panel(
        &self,
        kind: PanelKind,
        host: Host,
        measure: Rc<dyn Measure>,
    ) -> FloatingPanel {
        FloatingPanel::with_config(host, measure, self.preset(kind), self.controller)
    }
}

/// Errors from loading or validating a [`PerchConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perch_core::geometry::Size;
    use perch_runtime::testing::MeasureStub;

    #[test]
    fn default_uses_widget_presets() {
        let config = PerchConfig::default();
        assert_eq!(config.preset(PanelKind::Dropdown), PanelPreset::dropdown());
        assert_eq!(config.preset(PanelKind::ContextMenu), PanelPreset::context_menu());
        assert_eq!(config.preset(PanelKind::TabOverflow), PanelPreset::tab_overflow());
        assert_eq!(config.controller, ControllerConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn validate_collects_every_problem() {
        let mut config = PerchConfig::default();
        config.dropdown.estimate = Size::new(-1.0, 10.0);
        config.tab_overflow.preferences.gap = f64::NAN;
        config.controller.max_measure_frames = 0;
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors.iter().any(|e| e.starts_with("dropdown.estimate")));
        assert!(errors.iter().any(|e| e.starts_with("tab_overflow.preferences.gap")));
        assert!(errors.iter().any(|e| e.starts_with("controller.max_measure_frames")));
    }

    #[test]
    fn validated_wraps_errors() {
        let mut config = PerchConfig::default();
        config.controller.max_measure_frames = 0;
        let err = config.validated().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 1));
        assert!(err.to_string().starts_with("validation errors: "));
    }

    #[test]
    fn panel_carries_preset() {
        let config = PerchConfig::default();
        let host = Host::new(Size::new(800.0, 600.0));
        let measure: Rc<dyn Measure> = Rc::new(MeasureStub::default());
        let panel = config.panel(PanelKind::TabOverflow, host, measure);
        assert_eq!(*panel.preset(), PanelPreset::tab_overflow());
        assert!(!panel.is_open());
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_override() {
        let config = PerchConfig::from_toml_str(
            r#"
            [dropdown.estimate]
            width = 240.0
            height = 320.0

            [controller]
            max_measure_frames = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.dropdown.estimate, Size::new(240.0, 320.0));
        assert_eq!(config.controller.max_measure_frames, 4);
        assert_eq!(config.context_menu, PanelPreset::context_menu());
        assert_eq!(config.tab_overflow, PanelPreset::tab_overflow());
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_partial_override() {
        let config = PerchConfig::from_json_str(
            r#"{"context_menu": {"preferences": {"allow_flip_horizontal": false}}}"#,
        )
        .unwrap();
        assert!(!config.context_menu.preferences.allow_flip_horizontal);
        assert!(config.context_menu.preferences.allow_flip_vertical);
        assert_eq!(config.dropdown, PanelPreset::dropdown());
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_section_keeps_widget_preset() {
        let config =
            PerchConfig::from_toml_str("[tab_overflow.preferences]\nviewport_padding = 24.0\n")
                .unwrap();
        let expected = PanelPreset::tab_overflow()
            .preferences(PanelPreset::tab_overflow().preferences.viewport_padding(24.0));
        assert_eq!(config.tab_overflow, expected);
        assert_eq!(config.tab_overflow.estimate, Size::new(220.0, 320.0));
        assert_eq!(config.tab_overflow.preferences.gap, 2.0);
        assert_eq!(config.dropdown, PanelPreset::dropdown());
    }

    #[cfg(feature = "config")]
    #[test]
    fn empty_documents_are_default() {
        assert_eq!(PerchConfig::from_toml_str("").unwrap(), PerchConfig::default());
        assert_eq!(PerchConfig::from_json_str("{}").unwrap(), PerchConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn parse_errors_are_typed() {
        assert!(matches!(
            PerchConfig::from_toml_str("[dropdown\n"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            PerchConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_round_trips() {
        let config = PerchConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(PerchConfig::from_toml_str(&text).unwrap(), config);
    }
}
