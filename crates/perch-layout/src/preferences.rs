#![forbid(unsafe_code)]

//! Tunables for the placement solver.

use serde::{Deserialize, Serialize};

/// Minimum clearance kept between a panel and the viewport edges.
pub const DEFAULT_VIEWPORT_PADDING: f64 = 8.0;

/// Space between the anchor and the panel on the vertical axis.
pub const DEFAULT_GAP: f64 = 4.0;

/// Solver configuration supplied by each consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementPreferences {
    /// Minimum distance from every viewport edge.
    pub viewport_padding: f64,
    /// Distance between anchor and panel (vertical axis only).
    pub gap: f64,
    /// Whether the panel may open above the anchor.
    pub allow_flip_vertical: bool,
    /// Whether the panel may align to the anchor's right edge.
    pub allow_flip_horizontal: bool,
}

impl Default for PlacementPreferences {
    fn default() -> Self {
        Self {
            viewport_padding: DEFAULT_VIEWPORT_PADDING,
            gap: DEFAULT_GAP,
            allow_flip_vertical: true,
            allow_flip_horizontal: true,
        }
    }
}

impl PlacementPreferences {
    /// Set the viewport padding.
    #[must_use]
    pub fn viewport_padding(mut self, padding: f64) -> Self {
        self.viewport_padding = padding;
        self
    }

    /// Set the anchor/panel gap.
    #[must_use]
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Enable or disable vertical flipping.
    #[must_use]
    pub fn allow_flip_vertical(mut self, allow: bool) -> Self {
        self.allow_flip_vertical = allow;
        self
    }

    /// Enable or disable horizontal flipping.
    #[must_use]
    pub fn allow_flip_horizontal(mut self, allow: bool) -> Self {
        self.allow_flip_horizontal = allow;
        self
    }

    /// Check that padding and gap are usable numbers.
    ///
    /// Returns a list of problems; empty means valid. `prefix` names the
    /// owning section in messages (e.g. `"dropdown.preferences"`).
    #[must_use]
    pub fn validate(&self, prefix: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.viewport_padding.is_finite() || self.viewport_padding < 0.0 {
            errors.push(format!(
                "{prefix}.viewport_padding must be finite and >= 0, got {}",
                self.viewport_padding
            ));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            errors.push(format!(
                "{prefix}.gap must be finite and >= 0, got {}",
                self.gap
            ));
        }
        errors
    }
}
