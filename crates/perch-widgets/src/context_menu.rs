#![forbid(unsafe_code)]

//! Context menu anchored to the pointer.
//!
//! The anchor is a zero-size box at the press position, so the solver
//! places the panel just below-right of the pointer and flips it up or left
//! near the viewport edges. Opening again somewhere else starts a fresh
//! session rather than moving the old one.

use std::fmt;
use std::rc::Rc;

use perch_core::event::{KeyCode, PointerButton};
use perch_core::geometry::{BoundingBox, Point};
use perch_runtime::{Host, Measure};

use crate::menu::{Menu, MenuItem, MenuOutcome};
use crate::panel::FloatingPanel;
use crate::preset::PanelPreset;

/// Pointer anchor; panel measurement comes from the host.
struct PointerAnchor {
    point: Point,
    host_measure: Rc<dyn Measure>,
}

impl Measure for PointerAnchor {
    fn anchor_box(&self) -> Option<BoundingBox> {
        Some(BoundingBox::at_point(self.point))
    }

    fn panel_box(&self) -> Option<BoundingBox> {
        self.host_measure.panel_box()
    }
}

/// Headless context menu.
pub struct ContextMenu {
    panel: FloatingPanel,
    menu: Menu,
    panel_measure: Rc<dyn Measure>,
    origin: Option<Point>,
}

impl fmt::Debug for ContextMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenu")
            .field("panel", &self.panel)
            .field("menu", &self.menu)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl ContextMenu {
    /// `panel_measure` supplies the rendered panel box; its anchor is unused.
    pub fn new(host: Host, panel_measure: Rc<dyn Measure>, items: Vec<MenuItem>) -> Self {
        Self::with_preset(host, panel_measure, items, PanelPreset::context_menu())
    }

    pub fn with_preset(
        host: Host,
        panel_measure: Rc<dyn Measure>,
        items: Vec<MenuItem>,
        preset: PanelPreset,
    ) -> Self {
        Self::from_panel(FloatingPanel::new(host, panel_measure, preset), items)
    }

    /// Build from an existing panel; its measurement handle supplies the
    /// panel box.
    pub fn from_panel(panel: FloatingPanel, items: Vec<MenuItem>) -> Self {
        let panel_measure = Rc::clone(panel.measure());
        Self {
            panel,
            menu: Menu::new(items),
            panel_measure,
            origin: None,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    /// Where the current session was opened.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    #[must_use]
    pub fn panel(&self) -> &FloatingPanel {
        &self.panel
    }

    #[must_use]
    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Open at `point`, restarting if already open.
    pub fn open_at(&mut self, point: Point) -> MenuOutcome {
        if self.panel.is_open() {
            self.panel.close();
        }
        self.menu.clear_highlight();
        self.origin = Some(point);
        self.panel.open_with(Rc::new(PointerAnchor {
            point,
            host_measure: Rc::clone(&self.panel_measure),
        }));
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "perch.widgets",
            widget = "context_menu",
            x = point.x,
            y = point.y,
            "opened"
        );
        MenuOutcome::Opened
    }

    pub fn close(&mut self) -> MenuOutcome {
        if !self.panel.is_open() {
            return MenuOutcome::Ignored;
        }
        self.finish(MenuOutcome::Dismissed)
    }

    /// A pointer press.
    ///
    /// Secondary presses (re)open at the pointer. Other presses outside the
    /// visible panel dismiss.
    pub fn pointer_down(&mut self, point: Point, button: PointerButton) -> MenuOutcome {
        if button == PointerButton::Secondary {
            return self.open_at(point);
        }
        if !self.panel.is_open() || self.panel.contains_point(point) {
            return MenuOutcome::Ignored;
        }
        self.close()
    }

    /// Keyboard input while open. Closed menus ignore keys.
    pub fn handle_key(&mut self, key: KeyCode) -> MenuOutcome {
        if !self.panel.is_open() {
            return MenuOutcome::Ignored;
        }
        let outcome = self.menu.handle_open_key(key);
        self.finish(outcome)
    }

    /// A row was clicked.
    pub fn click_item(&mut self, index: usize) -> MenuOutcome {
        if !self.panel.is_open() {
            return MenuOutcome::Ignored;
        }
        let outcome = self.menu.activate(index);
        self.finish(outcome)
    }

    fn finish(&mut self, outcome: MenuOutcome) -> MenuOutcome {
        if outcome.closes() {
            self.panel.close();
            self.menu.clear_highlight();
            self.origin = None;
        }
        outcome
    }
}
