#![forbid(unsafe_code)]

//! Measurement adapter: where is the anchor, how big is the panel.

use perch_core::geometry::BoundingBox;

/// Reads live geometry for one anchor/panel pair.
///
/// Both methods return viewport-relative boxes. `None` means "not laid out
/// yet" (anchor unmounted, panel not rendered); the controller treats it
/// as not ready rather than as an error.
pub trait Measure {
    /// The anchor's current box.
    fn anchor_box(&self) -> Option<BoundingBox>;
    /// The panel's rendered box, once it exists.
    fn panel_box(&self) -> Option<BoundingBox>;
}

/// [`Measure`] built from two closures. See [`measure_fn`].
pub struct MeasureFn<A, P> {
    anchor: A,
    panel: P,
}

impl<A, P> std::fmt::Debug for MeasureFn<A, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasureFn").finish_non_exhaustive()
    }
}

impl<A, P> Measure for MeasureFn<A, P>
where
    A: Fn() -> Option<BoundingBox>,
    P: Fn() -> Option<BoundingBox>,
{
    fn anchor_box(&self) -> Option<BoundingBox> {
        (self.anchor)()
    }

    fn panel_box(&self) -> Option<BoundingBox> {
        (self.panel)()
    }
}

/// Adapt a pair of closures into a [`Measure`].
pub fn measure_fn<A, P>(anchor: A, panel: P) -> MeasureFn<A, P>
where
    A: Fn() -> Option<BoundingBox>,
    P: Fn() -> Option<BoundingBox>,
{
    MeasureFn { anchor, panel }
}
