#![forbid(unsafe_code)]

//! Flip/clamp placement of a panel next to an anchor.
//!
//! # Algorithm
//!
//! 1. Measure the space around the anchor ([`space_around`]).
//! 2. Vertical: open [`VerticalSide::Below`] unless the panel does not fit
//!    below *and* there is strictly more room above.
//! 3. Horizontal: align the panel's left edge to the anchor's left edge
//!    ([`HorizontalAlignment::LeftAligned`]) unless the panel does not fit
//!    to the right *and* there is strictly more room to the left, in which
//!    case the right edges are aligned ([`HorizontalAlignment::RightAligned`]).
//! 4. Offset vertically by the gap; horizontal edges touch.
//! 5. Clamp both axes into the padded viewport.
//!
//! A flip never moves the panel to a side with less room than the
//! preferred one, so an anchor with little space on both sides keeps its
//! default orientation and relies on the clamp.

use std::fmt;

use perch_core::geometry::{BoundingBox, Size, ViewportSize, clamp_into, space_around};
use serde::{Deserialize, Serialize};

use crate::preferences::PlacementPreferences;

/// Which side of the anchor the panel opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalSide {
    /// Panel's bottom edge sits `gap` above the anchor's top edge.
    Above,
    /// Panel's top edge sits `gap` below the anchor's bottom edge.
    Below,
}

/// Which anchor edge the panel lines up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizontalAlignment {
    /// Left edges aligned; the panel extends to the right.
    LeftAligned,
    /// Right edges aligned; the panel extends to the left.
    RightAligned,
}

/// Horizontal component of a [`TransformOrigin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginX {
    /// Panel's left edge.
    Left,
    /// Panel's right edge.
    Right,
}

/// Vertical component of a [`TransformOrigin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OriginY {
    /// Panel's top edge.
    Top,
    /// Panel's bottom edge.
    Bottom,
}

/// The panel corner nearest the anchor.
///
/// A presentational hint for scale-in animations; placement correctness
/// does not depend on it. Displays in CSS `transform-origin` form, e.g.
/// `"top left"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformOrigin {
    /// Vertical edge.
    pub y: OriginY,
    /// Horizontal edge.
    pub x: OriginX,
}

impl TransformOrigin {
    /// Derive the origin from the two placement decisions.
    pub const fn for_placement(vertical: VerticalSide, horizontal: HorizontalAlignment) -> Self {
        let y = match vertical {
            VerticalSide::Below => OriginY::Top,
            VerticalSide::Above => OriginY::Bottom,
        };
        let x = match horizontal {
            HorizontalAlignment::LeftAligned => OriginX::Left,
            HorizontalAlignment::RightAligned => OriginX::Right,
        };
        Self { y, x }
    }
}

impl fmt::Display for TransformOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let y = match self.y {
            OriginY::Top => "top",
            OriginY::Bottom => "bottom",
        };
        let x = match self.x {
            OriginX::Left => "left",
            OriginX::Right => "right",
        };
        write!(f, "{y} {x}")
    }
}

/// Output of [`place`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    /// Panel's top edge in viewport coordinates.
    pub top: f64,
    /// Panel's left edge in viewport coordinates.
    pub left: f64,
    /// Chosen vertical side.
    pub vertical: VerticalSide,
    /// Chosen horizontal alignment.
    pub horizontal: HorizontalAlignment,
    /// Animation origin hint.
    pub transform_origin: TransformOrigin,
}

impl PlacementResult {
    /// The panel's box at this placement.
    pub fn rect(&self, panel: Size) -> BoundingBox {
        let panel = panel.sanitized();
        BoundingBox::new(self.top, self.left, panel.width, panel.height)
    }

    /// Whether the panel was moved above the anchor.
    pub fn flipped_vertically(&self) -> bool {
        self.vertical == VerticalSide::Above
    }

    /// Whether the panel was aligned to the anchor's right edge.
    pub fn flipped_horizontally(&self) -> bool {
        self.horizontal == HorizontalAlignment::RightAligned
    }
}

/// Compute where to draw `panel` next to `anchor` inside `viewport`.
///
/// Never fails. Degenerate inputs are sanitized (negative or NaN sizes
/// become zero) and the clamp guarantees the result starts inside the
/// padded viewport. When the panel is larger than the padded viewport on
/// an axis, that axis is pinned to the padding.
pub fn place(
    anchor: BoundingBox,
    panel: Size,
    viewport: ViewportSize,
    preferences: &PlacementPreferences,
) -> PlacementResult {
    let anchor = anchor.sanitized();
    let panel = panel.sanitized();
    let viewport = viewport.sanitized();
    let gap = if preferences.gap.is_nan() {
        0.0
    } else {
        preferences.gap
    };

    let space = space_around(anchor, viewport);

    let vertical = if preferences.allow_flip_vertical
        && space.below < panel.height
        && space.above > space.below
    {
        VerticalSide::Above
    } else {
        VerticalSide::Below
    };

    let horizontal = if preferences.allow_flip_horizontal
        && space.right < panel.width
        && space.left > space.right
    {
        HorizontalAlignment::RightAligned
    } else {
        HorizontalAlignment::LeftAligned
    };

    let raw_top = match vertical {
        VerticalSide::Below => anchor.bottom() + gap,
        VerticalSide::Above => anchor.top - panel.height - gap,
    };
    let raw_left = match horizontal {
        HorizontalAlignment::LeftAligned => anchor.left,
        HorizontalAlignment::RightAligned => anchor.right() - panel.width,
    };

    let (top, left) = clamp_into(
        raw_top,
        raw_left,
        panel,
        viewport,
        preferences.viewport_padding,
    );

    #[cfg(feature = "tracing")]
    tracing::trace!(
        ?vertical,
        ?horizontal,
        space_above = space.above,
        space_below = space.below,
        space_left = space.left,
        space_right = space.right,
        raw_top,
        raw_left,
        top,
        left,
        "placement resolved"
    );

    PlacementResult {
        top,
        left,
        vertical,
        horizontal,
        transform_origin: TransformOrigin::for_placement(vertical, horizontal),
    }
}
