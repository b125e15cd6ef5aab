#![forbid(unsafe_code)]

//! A placement session bound to one panel.

use std::fmt;
use std::rc::Rc;

use perch_core::geometry::{BoundingBox, Point};
use perch_runtime::{
    ControllerConfig, Host, Measure, OpenRequest, PlacementController, PlacementSnapshot,
    Subscription,
};

use crate::preset::PanelPreset;

/// A [`PlacementController`] with its measurement handle and preset.
///
/// The widgets only ever talk to placement through this type, so all three
/// share one set of placement semantics and differ only in preset and
/// anchor.
pub struct FloatingPanel {
    controller: PlacementController,
    measure: Rc<dyn Measure>,
    preset: PanelPreset,
}

impl fmt::Debug for FloatingPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatingPanel")
            .field("controller", &self.controller)
            .field("preset", &self.preset)
            .finish_non_exhaustive()
    }
}

impl FloatingPanel {
    /// Create a closed panel.
    pub fn new(host: Host, measure: Rc<dyn Measure>, preset: PanelPreset) -> Self {
        Self::with_config(host, measure, preset, ControllerConfig::default())
    }

    /// Create a closed panel with explicit controller config.
    pub fn with_config(
        host: Host,
        measure: Rc<dyn Measure>,
        preset: PanelPreset,
        config: ControllerConfig,
    ) -> Self {
        Self {
            controller: PlacementController::with_config(host, config),
            measure,
            preset,
        }
    }

    /// Open with the panel's own measurement handle.
    pub fn open(&self) {
        self.open_with(Rc::clone(&self.measure));
    }

    /// Open with a different measurement handle (e.g. a pointer anchor).
    pub fn open_with(&self, measure: Rc<dyn Measure>) {
        self.controller.open(OpenRequest::new(
            measure,
            self.preset.preferences,
            self.preset.estimate,
        ));
    }

    /// Close the session.
    pub fn close(&self) {
        self.controller.close();
    }

    /// Open if closed, close if open. Returns the new open state.
    pub fn toggle(&self) -> bool {
        if self.is_open() {
            self.close();
            false
        } else {
            self.open();
            true
        }
    }

    /// Whether a session is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    /// Latest placement snapshot.
    #[must_use]
    pub fn snapshot(&self) -> PlacementSnapshot {
        self.controller.snapshot()
    }

    /// Where to draw the panel, or `None` while it must stay hidden.
    #[must_use]
    pub fn visible_rect(&self) -> Option<BoundingBox> {
        let snap = self.snapshot();
        if !snap.is_positioned {
            return None;
        }
        snap.position.map(|p| p.rect(snap.panel_size))
    }

    /// Whether `point` hits the visible panel.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.visible_rect().is_some_and(|r| r.contains(point))
    }

    /// Whether `point` hits this panel's anchor.
    #[must_use]
    pub fn anchor_contains(&self, point: Point) -> bool {
        self.measure
            .anchor_box()
            .is_some_and(|b| b.sanitized().contains(point))
    }

    /// Recompute after the anchor moved without a viewport signal.
    pub fn refresh(&self) {
        self.controller.refresh();
    }

    /// Be told about placement changes (e.g. to schedule a redraw).
    pub fn subscribe(&self, callback: impl Fn(&PlacementSnapshot) + 'static) -> Subscription {
        self.controller.subscribe(callback)
    }

    /// The measurement handle [`open`](Self::open) uses.
    #[must_use]
    pub fn measure(&self) -> &Rc<dyn Measure> {
        &self.measure
    }

    /// The preset this panel opens with.
    #[must_use]
    pub fn preset(&self) -> &PanelPreset {
        &self.preset
    }

    /// The underlying controller.
    #[must_use]
    pub fn controller(&self) -> &PlacementController {
        &self.controller
    }
}
