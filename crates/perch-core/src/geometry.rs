#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are viewport-relative `f64` values with the origin at the
//! top-left corner. Boxes may sit partly or fully outside the viewport and
//! may carry fractional values. Nothing here fails: degenerate input
//! (negative or NaN dimensions) is treated as zero-area.

/// Replace NaN with zero, keep everything else.
#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}

/// Non-negative, non-NaN extent.
#[inline]
fn extent(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 { 0.0 } else { v }
}

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal offset from the viewport's left edge.
    pub x: f64,
    /// Vertical offset from the viewport's top edge.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

/// The visible rendering area. Read fresh for every calculation.
pub type ViewportSize = Size;

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp negative and NaN dimensions to zero.
    #[inline]
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new(extent(self.width), extent(self.height))
    }

    /// Whether either dimension is zero (after sanitizing).
    #[inline]
    pub fn is_empty(&self) -> bool {
        let s = self.sanitized();
        s.width == 0.0 || s.height == 0.0
    }
}

/// An axis-aligned box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl BoundingBox {
    /// Create a new box.
    #[inline]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// A box of the given size at the origin.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// A zero-size box at a point. Used as the anchor for pointer-opened menus.
    #[inline]
    pub const fn at_point(point: Point) -> Self {
        Self::new(point.y, point.x, 0.0, 0.0)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Width and height as a [`Size`].
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether the box has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Coerce NaN coordinates to zero and negative/NaN dimensions to zero.
    #[inline]
    #[must_use]
    pub fn sanitized(self) -> Self {
        let size = self.size().sanitized();
        Self::new(
            finite_or_zero(self.top),
            finite_or_zero(self.left),
            size.width,
            size.height,
        )
    }

    /// Whether a point lies inside the box (right and bottom edges exclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }
}

/// Space between an anchor and each viewport edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spaces {
    /// From the viewport's top edge to the anchor's top edge.
    pub above: f64,
    /// From the anchor's bottom edge to the viewport's bottom edge.
    pub below: f64,
    /// From the viewport's left edge to the anchor's right edge.
    pub left: f64,
    /// From the anchor's left edge to the viewport's right edge.
    pub right: f64,
}

/// Measure the room around `anchor` inside `viewport`.
///
/// Horizontal spaces are measured from the *opposite* anchor edge: a panel
/// aligned to the anchor's left edge extends rightwards from `anchor.left`,
/// and one aligned to the anchor's right edge extends leftwards from
/// `anchor.right`. Values go negative when the anchor lies outside the
/// viewport.
pub fn space_around(anchor: BoundingBox, viewport: ViewportSize) -> Spaces {
    let anchor = anchor.sanitized();
    let viewport = viewport.sanitized();
    Spaces {
        above: anchor.top,
        below: viewport.height - anchor.bottom(),
        left: anchor.right(),
        right: viewport.width - anchor.left,
    }
}

/// Clamp a start coordinate so `[start, start + extent)` stays within
/// `[padding, container - padding]`.
///
/// When the box cannot fit with padding on both sides the result is
/// `padding`: the start of the box stays visible and the far edge gives.
pub fn clamp_axis(start: f64, extent_len: f64, container: f64, padding: f64) -> f64 {
    let padding = extent(padding);
    if start.is_nan() {
        return padding;
    }
    let max = extent(container) - extent(extent_len) - padding;
    if max.is_nan() || max < padding {
        padding
    } else {
        start.clamp(padding, max)
    }
}

/// Clamp a `(top, left)` pair for a box of `size` into `viewport`.
pub fn clamp_into(
    top: f64,
    left: f64,
    size: Size,
    viewport: ViewportSize,
    padding: f64,
) -> (f64, f64) {
    (
        clamp_axis(top, size.height, viewport.height, padding),
        clamp_axis(left, size.width, viewport.width, padding),
    )
}
