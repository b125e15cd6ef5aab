#![forbid(unsafe_code)]

//! Menu items and keyboard highlight.
//!
//! Highlight movement skips separators and disabled items and wraps at both
//! ends. A menu with nothing selectable never highlights anything.

use std::fmt;

use perch_core::event::KeyCode;

/// What a menu row is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItemKind {
    /// A selectable command.
    Action,
    /// A divider line.
    Separator,
}

/// One menu row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    label: String,
    kind: MenuItemKind,
    enabled: bool,
}

impl MenuItem {
    /// An enabled action.
    #[must_use]
    pub fn action(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: MenuItemKind::Action,
            enabled: true,
        }
    }

    /// A divider.
    #[must_use]
    pub fn separator() -> Self {
        Self {
            label: String::new(),
            kind: MenuItemKind::Separator,
            enabled: false,
        }
    }

    /// Set whether the item can be selected.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Shorthand for `enabled(false)`.
    #[must_use]
    pub fn disabled(self) -> Self {
        self.enabled(false)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn kind(&self) -> MenuItemKind {
        self.kind
    }

    /// Whether highlight and selection may land here.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.kind == MenuItemKind::Action && self.enabled
    }
}

/// Result of feeding input to a menu widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The panel opened.
    Opened,
    /// The highlight moved (or stayed put on a single selectable item).
    Moved,
    /// The item at this index was chosen; the panel closed.
    Selected(usize),
    /// The panel closed without a choice.
    Dismissed,
    /// Nothing happened.
    Ignored,
}

impl MenuOutcome {
    /// Whether the widget closed its panel in response.
    #[must_use]
    pub fn closes(self) -> bool {
        matches!(self, Self::Selected(_) | Self::Dismissed)
    }
}

impl fmt::Display for MenuOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opened => f.write_str("opened"),
            Self::Moved => f.write_str("moved"),
            Self::Selected(index) => write!(f, "selected({index})"),
            Self::Dismissed => f.write_str("dismissed"),
            Self::Ignored => f.write_str("ignored"),
        }
    }
}

/// Items plus the keyboard highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
    highlighted: Option<usize>,
}

impl Menu {
    #[must_use]
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            highlighted: None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Replace the items. Clears the highlight.
    pub fn set_items(&mut self, items: Vec<MenuItem>) {
        self.items = items;
        self.highlighted = None;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the highlighted item.
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    /// Highlight `index` if it is selectable.
    pub fn highlight(&mut self, index: usize) -> bool {
        if self.items.get(index).is_some_and(MenuItem::is_selectable) {
            self.highlighted = Some(index);
            true
        } else {
            false
        }
    }

    pub fn highlight_first(&mut self) -> bool {
        self.highlighted = self.items.iter().position(MenuItem::is_selectable);
        self.highlighted.is_some()
    }

    pub fn highlight_last(&mut self) -> bool {
        self.highlighted = self.items.iter().rposition(MenuItem::is_selectable);
        self.highlighted.is_some()
    }

    /// Move down, wrapping. Starts at the first item when nothing is lit.
    pub fn highlight_next(&mut self) -> bool {
        let Some(current) = self.highlighted else {
            return self.highlight_first();
        };
        let n = self.items.len();
        let next = (1..=n)
            .map(|step| (current + step) % n)
            .find(|&i| self.items[i].is_selectable());
        self.highlighted = next;
        next.is_some()
    }

    /// Move up, wrapping. Starts at the last item when nothing is lit.
    pub fn highlight_prev(&mut self) -> bool {
        let Some(current) = self.highlighted else {
            return self.highlight_last();
        };
        let n = self.items.len();
        let prev = (1..=n)
            .map(|step| (current + n - step % n) % n)
            .find(|&i| self.items[i].is_selectable());
        self.highlighted = prev;
        prev.is_some()
    }

    /// Key handling while the menu is open.
    ///
    /// Does not close anything itself; callers close their panel when the
    /// outcome [`closes`](MenuOutcome::closes).
    pub fn handle_open_key(&mut self, key: KeyCode) -> MenuOutcome {
        let moved = match key {
            KeyCode::Down => self.highlight_next(),
            KeyCode::Up => self.highlight_prev(),
            KeyCode::Home => self.highlight_first(),
            KeyCode::End => self.highlight_last(),
            KeyCode::Enter | KeyCode::Space => {
                return self.activate_highlighted();
            }
            KeyCode::Escape | KeyCode::Tab => return MenuOutcome::Dismissed,
            KeyCode::Other => return MenuOutcome::Ignored,
        };
        if moved {
            MenuOutcome::Moved
        } else {
            MenuOutcome::Ignored
        }
    }

    /// Choose the highlighted item, if any.
    pub fn activate_highlighted(&self) -> MenuOutcome {
        match self.highlighted {
            Some(index) if self.items[index].is_selectable() => MenuOutcome::Selected(index),
            _ => MenuOutcome::Ignored,
        }
    }

    /// Choose `index` directly (pointer click on a row).
    pub fn activate(&self, index: usize) -> MenuOutcome {
        if self.items.get(index).is_some_and(MenuItem::is_selectable) {
            MenuOutcome::Selected(index)
        } else {
            MenuOutcome::Ignored
        }
    }
}
