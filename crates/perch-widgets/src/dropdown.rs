#![forbid(unsafe_code)]

//! Dropdown menu anchored to a trigger.
//!
//! # Keys
//!
//! | State | Key | Effect |
//! |-------|-----|--------|
//! | closed | Enter, Space, Down | open, highlight first |
//! | closed | Up | open, highlight last |
//! | open | Up, Down, Home, End | move highlight |
//! | open | Enter, Space | select highlighted, close |
//! | open | Escape, Tab | close |
//!
//! A pointer press outside both the trigger and the visible panel closes
//! the menu. Presses on the trigger go through [`DropdownMenu::click_trigger`].

use std::rc::Rc;

use perch_core::event::KeyCode;
use perch_core::geometry::Point;
use perch_runtime::{Host, Measure};

use crate::menu::{Menu, MenuItem, MenuOutcome};
use crate::panel::FloatingPanel;
use crate::preset::PanelPreset;

/// Headless dropdown: placement session plus menu model.
#[derive(Debug)]
pub struct DropdownMenu {
    panel: FloatingPanel,
    menu: Menu,
}

impl DropdownMenu {
    /// A closed dropdown with the default preset.
    pub fn new(host: Host, measure: Rc<dyn Measure>, items: Vec<MenuItem>) -> Self {
        Self::with_preset(host, measure, items, PanelPreset::dropdown())
    }

    pub fn with_preset(
        host: Host,
        measure: Rc<dyn Measure>,
        items: Vec<MenuItem>,
        preset: PanelPreset,
    ) -> Self {
        Self {
            panel: FloatingPanel::new(host, measure, preset),
            menu: Menu::new(items),
        }
    }

    /// Build from an existing panel (e.g. one with a custom controller config).
    pub fn from_panel(panel: FloatingPanel, items: Vec<MenuItem>) -> Self {
        Self {
            panel,
            menu: Menu::new(items),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    #[must_use]
    pub fn panel(&self) -> &FloatingPanel {
        &self.panel
    }

    #[must_use]
    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Open without moving the highlight.
    pub fn open(&mut self) -> MenuOutcome {
        if self.panel.is_open() {
            return MenuOutcome::Ignored;
        }
        self.menu.clear_highlight();
        self.panel.open();
        MenuOutcome::Opened
    }

    pub fn close(&mut self) -> MenuOutcome {
        if !self.panel.is_open() {
            return MenuOutcome::Ignored;
        }
        self.finish(MenuOutcome::Dismissed)
    }

    /// Keyboard input while the trigger or the menu has focus.
    pub fn handle_key(&mut self, key: KeyCode) -> MenuOutcome {
        if !self.panel.is_open() {
            return match key {
                KeyCode::Enter | KeyCode::Space | KeyCode::Down => {
                    self.open();
                    self.menu.highlight_first();
                    MenuOutcome::Opened
                }
                KeyCode::Up => {
                    self.open();
                    self.menu.highlight_last();
                    MenuOutcome::Opened
                }
                _ => MenuOutcome::Ignored,
            };
        }
        let outcome = self.menu.handle_open_key(key);
        self.finish(outcome)
    }

    /// The trigger was clicked: toggle.
    pub fn click_trigger(&mut self) -> MenuOutcome {
        if self.panel.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// A row was clicked.
    pub fn click_item(&mut self, index: usize) -> MenuOutcome {
        if !self.panel.is_open() {
            return MenuOutcome::Ignored;
        }
        let outcome = self.menu.activate(index);
        self.finish(outcome)
    }

    /// A pointer press landed at `point`.
    pub fn pointer_down(&mut self, point: Point) -> MenuOutcome {
        if !self.panel.is_open()
            || self.panel.contains_point(point)
            || self.panel.anchor_contains(point)
        {
            return MenuOutcome::Ignored;
        }
        self.close()
    }

    fn finish(&mut self, outcome: MenuOutcome) -> MenuOutcome {
        if outcome.closes() {
            self.panel.close();
            self.menu.clear_highlight();
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target: "perch.widgets",
                widget = "dropdown",
                %outcome,
                "menu closed"
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perch_core::geometry::{BoundingBox, Size};
    use perch_runtime::testing::MeasureStub;

    fn dropdown() -> (Host, Rc<MeasureStub>, DropdownMenu) {
        let host = Host::new(Size::new(1024.0, 768.0));
        let stub = Rc::new(MeasureStub::with_anchor(BoundingBox::new(
            40.0, 40.0, 100.0, 30.0,
        )));
        let menu = DropdownMenu::new(
            host.clone(),
            Rc::clone(&stub) as Rc<dyn Measure>,
            vec![
                MenuItem::action("New"),
                MenuItem::separator(),
                MenuItem::action("Open"),
                MenuItem::action("Save").disabled(),
            ],
        );
        (host, stub, menu)
    }

    #[test]
    fn down_opens_on_first() {
        let (_host, _stub, mut dd) = dropdown();
        assert_eq!(dd.handle_key(KeyCode::Down), MenuOutcome::Opened);
        assert!(dd.is_open());
        assert_eq!(dd.menu().highlighted(), Some(0));
    }

    #[test]
    fn up_opens_on_last_selectable() {
        let (_host, _stub, mut dd) = dropdown();
        assert_eq!(dd.handle_key(KeyCode::Up), MenuOutcome::Opened);
        assert_eq!(dd.menu().highlighted(), Some(2));
    }

    #[test]
    fn other_keys_do_not_open() {
        let (_host, _stub, mut dd) = dropdown();
        assert_eq!(dd.handle_key(KeyCode::Escape), MenuOutcome::Ignored);
        assert_eq!(dd.handle_key(KeyCode::Other), MenuOutcome::Ignored);
        assert!(!dd.is_open());
    }

    #[test]
    fn enter_selects_and_closes() {
        let (_host, _stub, mut dd) = dropdown();
        dd.handle_key(KeyCode::Enter);
        dd.handle_key(KeyCode::Down);
        assert_eq!(dd.handle_key(KeyCode::Enter), MenuOutcome::Selected(2));
        assert!(!dd.is_open());
        assert_eq!(dd.menu().highlighted(), None);
    }

    #[test]
    fn escape_and_tab_dismiss() {
        let (_host, _stub, mut dd) = dropdown();
        dd.handle_key(KeyCode::Space);
        assert_eq!(dd.handle_key(KeyCode::Escape), MenuOutcome::Dismissed);
        assert!(!dd.is_open());

        dd.handle_key(KeyCode::Space);
        assert_eq!(dd.handle_key(KeyCode::Tab), MenuOutcome::Dismissed);
        assert!(!dd.is_open());
    }

    #[test]
    fn trigger_click_toggles() {
        let (_host, _stub, mut dd) = dropdown();
        assert_eq!(dd.click_trigger(), MenuOutcome::Opened);
        assert_eq!(dd.menu().highlighted(), None);
        assert_eq!(dd.click_trigger(), MenuOutcome::Dismissed);
        assert!(!dd.is_open());
    }

    #[test]
    fn outside_press_dismisses_inside_does_not() {
        let (host, stub, mut dd) = dropdown();
        stub.set_panel(Some(BoundingBox::new(0.0, 0.0, 160.0, 120.0)));
        dd.click_trigger();
        host.run_frame();

        // Panel sits at top 74, left 40.
        assert_eq!(dd.pointer_down(Point::new(60.0, 100.0)), MenuOutcome::Ignored);
        assert_eq!(dd.pointer_down(Point::new(50.0, 50.0)), MenuOutcome::Ignored);
        assert!(dd.is_open());
        assert_eq!(dd.pointer_down(Point::new(900.0, 700.0)), MenuOutcome::Dismissed);
        assert!(!dd.is_open());
    }

    #[test]
    fn click_item_honors_disabled() {
        let (_host, _stub, mut dd) = dropdown();
        dd.click_trigger();
        assert_eq!(dd.click_item(3), MenuOutcome::Ignored);
        assert!(dd.is_open());
        assert_eq!(dd.click_item(0), MenuOutcome::Selected(0));
        assert!(!dd.is_open());
    }

    #[test]
    fn closed_dropdown_ignores_item_and_pointer() {
        let (_host, _stub, mut dd) = dropdown();
        assert_eq!(dd.click_item(0), MenuOutcome::Ignored);
        assert_eq!(dd.pointer_down(Point::new(900.0, 700.0)), MenuOutcome::Ignored);
        assert_eq!(dd.close(), MenuOutcome::Ignored);
    }
}
