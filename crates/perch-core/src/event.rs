#![forbid(unsafe_code)]

//! Input codes consumed by the floating-panel widgets.
//!
//! Only the keys that drive menu focus and dismissal are modelled; hosts
//! translate their native events into these before handing them over.

/// Keys that menus react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Jump to the first item.
    Home,
    /// Jump to the last item.
    End,
    /// Activate.
    Enter,
    /// Space bar (activates, like Enter).
    Space,
    /// Dismiss.
    Escape,
    /// Focus moves away; open menus close.
    Tab,
    /// Any other key. Ignored by menus.
    Other,
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary (usually left) button.
    Primary,
    /// Secondary (usually right) button; opens context menus.
    Secondary,
    /// Middle button.
    Middle,
}
