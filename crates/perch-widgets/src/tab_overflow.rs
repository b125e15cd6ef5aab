#![forbid(unsafe_code)]

//! Tab bar overflow.
//!
//! [`split_tabs`] decides which tabs fit in the bar; the rest are listed in
//! a menu hanging off an overflow trigger at the end of the bar. The active
//! tab is always visible: when it would overflow it takes the last visible
//! slot.

use std::rc::Rc;

use perch_core::event::KeyCode;
use perch_core::geometry::Point;
use perch_runtime::{Host, Measure};

use crate::menu::{Menu, MenuItem, MenuOutcome};
use crate::panel::FloatingPanel;
use crate::preset::PanelPreset;

/// One tab in the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct TabEntry {
    pub title: String,
    /// Rendered width in the bar.
    pub width: f64,
}

impl TabEntry {
    #[must_use]
    pub fn new(title: impl Into<String>, width: f64) -> Self {
        Self {
            title: title.into(),
            width,
        }
    }
}

/// Which tabs the bar shows and which go to the overflow menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverflowLayout {
    /// Tab indices in bar order.
    pub visible: Vec<usize>,
    /// Tab indices in the overflow menu, ascending.
    pub hidden: Vec<usize>,
}

impl OverflowLayout {
    /// Whether the overflow trigger should be shown.
    #[must_use]
    pub fn has_overflow(&self) -> bool {
        !self.hidden.is_empty()
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.max(0.0) }
}

/// Split tabs between the bar and the overflow menu.
///
/// When everything fits, nothing is hidden and no room is reserved for the
/// trigger. Otherwise the bar keeps the longest prefix that fits next to
/// the trigger. An active tab outside that prefix replaces tabs from the end
/// of it until it fits, and is shown even if it is wider than the bar.
#[must_use]
pub fn split_tabs(
    widths: &[f64],
    active: Option<usize>,
    bar_width: f64,
    trigger_width: f64,
) -> OverflowLayout {
    let widths: Vec<f64> = widths.iter().copied().map(non_negative).collect();
    let bar_width = non_negative(bar_width);

    if widths.iter().sum::<f64>() <= bar_width {
        return OverflowLayout {
            visible: (0..widths.len()).collect(),
            hidden: Vec::new(),
        };
    }

    let available = (bar_width - non_negative(trigger_width)).max(0.0);
    let mut visible = Vec::new();
    let mut used = 0.0;
    for (i, &w) in widths.iter().enumerate() {
        if used + w > available {
            break;
        }
        used += w;
        visible.push(i);
    }

    if let Some(a) = active.filter(|&a| a < widths.len() && a >= visible.len()) {
        while used + widths[a] > available {
            let Some(last) = visible.pop() else {
                break;
            };
            used -= widths[last];
        }
        visible.push(a);
    }

    let hidden = (0..widths.len()).filter(|i| !visible.contains(i)).collect();
    OverflowLayout { visible, hidden }
}

/// Headless tab overflow menu.
///
/// Menu rows are the hidden tabs in index order. Selecting one activates
/// that tab, which moves it into the bar.
#[derive(Debug)]
pub struct TabOverflowMenu {
    panel: FloatingPanel,
    menu: Menu,
    tabs: Vec<TabEntry>,
    active: Option<usize>,
    trigger_width: f64,
    bar_width: f64,
    layout: OverflowLayout,
}

impl TabOverflowMenu {
    /// `trigger_measure` anchors to the overflow trigger button.
    pub fn new(
        host: Host,
        trigger_measure: Rc<dyn Measure>,
        tabs: Vec<TabEntry>,
        trigger_width: f64,
    ) -> Self {
        Self::with_preset(
            host,
            trigger_measure,
            tabs,
            trigger_width,
            PanelPreset::tab_overflow(),
        )
    }

    pub fn with_preset(
        host: Host,
        trigger_measure: Rc<dyn Measure>,
        tabs: Vec<TabEntry>,
        trigger_width: f64,
        preset: PanelPreset,
    ) -> Self {
        Self::from_panel(
            FloatingPanel::new(host, trigger_measure, preset),
            tabs,
            trigger_width,
        )
    }

    /// Build from an existing panel anchored to the overflow trigger.
    pub fn from_panel(panel: FloatingPanel, tabs: Vec<TabEntry>, trigger_width: f64) -> Self {
        let active = (!tabs.is_empty()).then_some(0);
        Self {
            panel,
            menu: Menu::default(),
            tabs,
            active,
            trigger_width,
            bar_width: f64::INFINITY,
            layout: OverflowLayout::default(),
        }
    }

    #[must_use]
    pub fn tabs(&self) -> &[TabEntry] {
        &self.tabs
    }

    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Result of the latest [`layout`](Self::layout) call.
    #[must_use]
    pub fn current_layout(&self) -> &OverflowLayout {
        &self.layout
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

    /// Lay the bar out at `bar_width`. Closes the menu if nothing overflows.
    pub fn layout(&mut self, bar_width: f64) -> &OverflowLayout {
        self.bar_width = bar_width;
        self.relayout();
        &self.layout
    }

    /// Make `index` the active tab.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        self.active = Some(index);
        self.relayout();
        true
    }

    /// Keyboard input while the trigger or the menu has focus.
    pub fn handle_key(&mut self, key: KeyCode) -> MenuOutcome {
        if !self.panel.is_open() {
            let highlight_last = match key {
                KeyCode::Enter | KeyCode::Space | KeyCode::Down => false,
                KeyCode::Up => true,
                _ => return MenuOutcome::Ignored,
            };
            let outcome = self.open();
            if outcome == MenuOutcome::Opened {
                if highlight_last {
                    self.menu.highlight_last();
                } else {
                    self.menu.highlight_first();
                }
            }
            return outcome;
        }
        let outcome = self.menu.handle_open_key(key);
        self.finish(outcome)
    }

    /// The overflow trigger was clicked: toggle.
    pub fn click_trigger(&mut self) -> MenuOutcome {
        if self.panel.is_open() {
            self.finish(MenuOutcome::Dismissed)
        } else {
            self.open()
        }
    }

    /// A menu row was clicked.
    pub fn click_item(&mut self, row: usize) -> MenuOutcome {
        if !self.panel.is_open() {
            return MenuOutcome::Ignored;
        }
        let outcome = self.menu.activate(row);
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
        self.finish(MenuOutcome::Dismissed)
    }

    fn open(&mut self) -> MenuOutcome {
        if !self.layout.has_overflow() {
            return MenuOutcome::Ignored;
        }
        self.menu.clear_highlight();
        self.panel.open();
        MenuOutcome::Opened
    }

    /// Selections come back as tab indices, not menu rows.
    fn finish(&mut self, outcome: MenuOutcome) -> MenuOutcome {
        let outcome = match outcome {
            MenuOutcome::Selected(row) => match self.layout.hidden.get(row).copied() {
                Some(tab) => {
                    self.active = Some(tab);
                    MenuOutcome::Selected(tab)
                }
                None => MenuOutcome::Ignored,
            },
            other => other,
        };
        if outcome.closes() {
            self.panel.close();
            self.menu.clear_highlight();
            self.relayout();
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target: "perch.widgets",
                widget = "tab_overflow",
                %outcome,
                "menu closed"
            );
        }
        outcome
    }

    fn relayout(&mut self) {
        let widths: Vec<f64> = self.tabs.iter().map(|t| t.width).collect();
        let layout = split_tabs(&widths, self.active, self.bar_width, self.trigger_width);
        if layout.hidden != self.layout.hidden {
            self.menu.set_items(
                layout
                    .hidden
                    .iter()
                    .map(|&i| MenuItem::action(self.tabs[i].title.clone()))
                    .collect(),
            );
        }
        self.layout = layout;
        if !self.layout.has_overflow() && self.panel.is_open() {
            self.panel.close();
            self.menu.clear_highlight();
        }
    }
}
