#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use perch_core::geometry::{BoundingBox, Size};
use perch_layout::{PlacementPreferences, VerticalSide, place};

#[derive(Debug, Arbitrary)]
struct Input {
    anchor: [f64; 4],
    panel: [f64; 2],
    viewport: [f64; 2],
    padding: f64,
    gap: f64,
    flip_vertical: bool,
    flip_horizontal: bool,
}

fuzz_target!(|input: Input| {
    let [top, left, width, height] = input.anchor;
    let anchor = BoundingBox::new(top, left, width, height);
    let panel = Size::new(input.panel[0], input.panel[1]);
    let viewport = Size::new(input.viewport[0], input.viewport[1]);
    let prefs = PlacementPreferences::default()
        .viewport_padding(input.padding)
        .gap(input.gap)
        .allow_flip_vertical(input.flip_vertical)
        .allow_flip_horizontal(input.flip_horizontal);

    // Must never panic, whatever the floats.
    let result = place(anchor, panel, viewport, &prefs);

    if !input.flip_vertical {
        assert_eq!(result.vertical, VerticalSide::Below);
    }

    // Containment for well-formed finite input.
    let finite = input.anchor.iter().all(|v| v.is_finite())
        && input.panel.iter().all(|v| v.is_finite() && *v >= 0.0)
        && input.viewport.iter().all(|v| v.is_finite() && *v >= 0.0)
        && input.padding.is_finite()
        && input.padding >= 0.0
        && input.gap.is_finite()
        && input
            .anchor
            .iter()
            .chain(&input.panel)
            .chain(&input.viewport)
            .chain([&input.padding, &input.gap])
            .all(|v| v.abs() < 1e9);
    if finite {
        let pad = input.padding;
        assert_eq!(result, place(anchor, panel, viewport, &prefs), "not deterministic");
        assert!(result.top.is_finite() && result.left.is_finite());
        if panel.height <= viewport.height - 2.0 * pad {
            assert!(result.top >= pad - 1e-6);
            assert!(result.top + panel.height <= viewport.height - pad + 1e-6);
        }
        if panel.width <= viewport.width - 2.0 * pad {
            assert!(result.left >= pad - 1e-6);
            assert!(result.left + panel.width <= viewport.width - pad + 1e-6);
        }
    }
});
