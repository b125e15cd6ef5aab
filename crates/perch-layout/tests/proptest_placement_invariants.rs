//! Property-based invariant tests for the placement solver.
//!
//! 1. Containment: a panel that fits the padded viewport lands fully inside it
//! 2. Oversize fallback: an axis that cannot fit is pinned to the padding
//! 3. Non-worsening flips: a flip only happens toward strictly more room
//! 4. Determinism: identical inputs give identical results
//! 5. Transform origin always agrees with the chosen sides

use perch_core::geometry::{BoundingBox, Size, space_around};
use perch_layout::{
    HorizontalAlignment, OriginX, OriginY, PlacementPreferences, VerticalSide, place,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn anchor_strategy() -> impl Strategy<Value = BoundingBox> {
    (
        -2000.0f64..4000.0,
        -2000.0f64..4000.0,
        0.0f64..500.0,
        0.0f64..200.0,
    )
        .prop_map(|(top, left, w, h)| BoundingBox::new(top, left, w, h))
}

fn panel_strategy() -> impl Strategy<Value = Size> {
    (0.0f64..2500.0, 0.0f64..2500.0).prop_map(|(w, h)| Size::new(w, h))
}

fn viewport_strategy() -> impl Strategy<Value = Size> {
    (50.0f64..3000.0, 50.0f64..3000.0).prop_map(|(w, h)| Size::new(w, h))
}

fn prefs_strategy() -> impl Strategy<Value = PlacementPreferences> {
    (0.0f64..32.0, 0.0f64..16.0, any::<bool>(), any::<bool>()).prop_map(|(pad, gap, v, h)| {
        PlacementPreferences::default()
            .viewport_padding(pad)
            .gap(gap)
            .allow_flip_vertical(v)
            .allow_flip_horizontal(h)
    })
}

const EPS: f64 = 1e-9;

// ═══════════════════════════════════════════════════════════════════════
// 1 + 2. Containment
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fitting_panel_is_contained(
        anchor in anchor_strategy(),
        panel in panel_strategy(),
        viewport in viewport_strategy(),
        prefs in prefs_strategy(),
    ) {
        let r = place(anchor, panel, viewport, &prefs);
        let pad = prefs.viewport_padding;

        if panel.height <= viewport.height - 2.0 * pad {
            prop_assert!(r.top >= pad);
            prop_assert!(r.top + panel.height <= viewport.height - pad + EPS);
        } else {
            prop_assert_eq!(r.top, pad);
        }

        if panel.width <= viewport.width - 2.0 * pad {
            prop_assert!(r.left >= pad);
            prop_assert!(r.left + panel.width <= viewport.width - pad + EPS);
        } else {
            prop_assert_eq!(r.left, pad);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Flips never move toward less room
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flips_only_toward_more_room(
        anchor in anchor_strategy(),
        panel in panel_strategy(),
        viewport in viewport_strategy(),
        prefs in prefs_strategy(),
    ) {
        let r = place(anchor, panel, viewport, &prefs);
        let s = space_around(anchor, viewport);

        if r.vertical == VerticalSide::Above {
            prop_assert!(prefs.allow_flip_vertical);
            prop_assert!(s.below < panel.height);
            prop_assert!(s.above > s.below);
        } else if prefs.allow_flip_vertical {
            prop_assert!(s.below >= panel.height || s.above <= s.below);
        }

        if r.horizontal == HorizontalAlignment::RightAligned {
            prop_assert!(prefs.allow_flip_horizontal);
            prop_assert!(s.right < panel.width);
            prop_assert!(s.left > s.right);
        } else if prefs.allow_flip_horizontal {
            prop_assert!(s.right >= panel.width || s.left <= s.right);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4 + 5. Determinism and origin consistency
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn placement_is_deterministic(
        anchor in anchor_strategy(),
        panel in panel_strategy(),
        viewport in viewport_strategy(),
        prefs in prefs_strategy(),
    ) {
        let a = place(anchor, panel, viewport, &prefs);
        let b = place(anchor, panel, viewport, &prefs);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn origin_matches_sides(
        anchor in anchor_strategy(),
        panel in panel_strategy(),
        viewport in viewport_strategy(),
        prefs in prefs_strategy(),
    ) {
        let r = place(anchor, panel, viewport, &prefs);
        let expected_y = match r.vertical {
            VerticalSide::Below => OriginY::Top,
            VerticalSide::Above => OriginY::Bottom,
        };
        let expected_x = match r.horizontal {
            HorizontalAlignment::LeftAligned => OriginX::Left,
            HorizontalAlignment::RightAligned => OriginX::Right,
        };
        prop_assert_eq!(r.transform_origin.y, expected_y);
        prop_assert_eq!(r.transform_origin.x, expected_x);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Degenerate inputs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn negative_panel_is_treated_as_empty() {
    let anchor = BoundingBox::new(100.0, 100.0, 10.0, 10.0);
    let r = place(
        anchor,
        Size::new(-50.0, -50.0),
        Size::new(800.0, 600.0),
        &PlacementPreferences::default(),
    );
    assert_eq!(r.top, 114.0);
    assert_eq!(r.left, 100.0);
}

#[test]
fn nan_anchor_is_treated_as_origin() {
    let anchor = BoundingBox::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
    let r = place(
        anchor,
        Size::new(100.0, 100.0),
        Size::new(800.0, 600.0),
        &PlacementPreferences::default(),
    );
    assert_eq!(r.top, 8.0);
    assert_eq!(r.left, 8.0);
}
