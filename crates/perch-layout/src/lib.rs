#![forbid(unsafe_code)]

//! Placement solver for anchored floating panels.
//!
//! [`place`] takes an anchor box, a panel size, the viewport size and a set
//! of [`PlacementPreferences`], and returns a [`PlacementResult`] whose
//! coordinates keep the panel inside the viewport. It prefers opening below
//! the anchor and aligned to its left edge, and flips either axis only when
//! the preferred side is too small *and* the opposite side is strictly
//! roomier.
//!
//! The solver is pure: same inputs, same output, no I/O.

pub mod placement;
pub mod preferences;

pub use placement::{
    HorizontalAlignment, OriginX, OriginY, PlacementResult, TransformOrigin, VerticalSide, place,
};
pub use preferences::{DEFAULT_GAP, DEFAULT_VIEWPORT_PADDING, PlacementPreferences};

pub use perch_core::geometry::{BoundingBox, Size, ViewportSize};
