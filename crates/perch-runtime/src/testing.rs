#![forbid(unsafe_code)]

//! Test doubles for the measurement adapter.

use std::cell::Cell;

use perch_core::geometry::BoundingBox;

use crate::measure::Measure;

/// A [`Measure`] whose boxes are set by the test.
///
/// Starts with no anchor and no panel. Counts reads so tests can assert
/// that nothing measures after a session closed.
#[derive(Debug, Default)]
pub struct MeasureStub {
    anchor: Cell<Option<BoundingBox>>,
    panel: Cell<Option<BoundingBox>>,
    anchor_reads: Cell<usize>,
}

impl MeasureStub {
    /// Stub with a mounted anchor and an unrendered panel.
    #[must_use]
    pub fn with_anchor(anchor: BoundingBox) -> Self {
        let stub = Self::default();
        stub.set_anchor(Some(anchor));
        stub
    }

    /// Replace the anchor box (`None` = unmounted).
    pub fn set_anchor(&self, anchor: Option<BoundingBox>) {
        self.anchor.set(anchor);
    }

    /// Replace the panel box (`None` = not rendered).
    pub fn set_panel(&self, panel: Option<BoundingBox>) {
        self.panel.set(panel);
    }

    /// How many times the anchor was measured.
    pub fn anchor_reads(&self) -> usize {
        self.anchor_reads.get()
    }
}

impl Measure for MeasureStub {
    fn anchor_box(&self) -> Option<BoundingBox> {
        self.anchor_reads.set(self.anchor_reads.get() + 1);
        self.anchor.get()
    }

    fn panel_box(&self) -> Option<BoundingBox> {
        self.panel.get()
    }
}
