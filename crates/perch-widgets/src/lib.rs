#![forbid(unsafe_code)]

//! Floating-panel consumers for Perch.
//!
//! Each widget here is headless: it owns a [`FloatingPanel`] (a placement
//! session plus its measurement handle and preset) and a [`Menu`] model,
//! reacts to keys and pointer input, and tells the host where to draw the
//! panel through [`FloatingPanel::visible_rect`]. Drawing is left to the
//! host.
//!
//! | Widget | Anchor | Preset |
//! |--------|--------|--------|
//! | [`DropdownMenu`] | trigger element | [`PanelPreset::dropdown`] |
//! | [`ContextMenu`] | pointer position | [`PanelPreset::context_menu`] |
//! | [`TabOverflowMenu`] | overflow trigger | [`PanelPreset::tab_overflow`] |

pub mod config;
pub mod context_menu;
pub mod dropdown;
pub mod menu;
pub mod panel;
pub mod preset;
pub mod tab_overflow;

pub use config::{ConfigError, PanelKind, PerchConfig};
pub use context_menu::ContextMenu;
pub use dropdown::DropdownMenu;
pub use menu::{Menu, MenuItem, MenuOutcome};
pub use panel::FloatingPanel;
pub use preset::PanelPreset;
pub use tab_overflow::{OverflowLayout, TabEntry, TabOverflowMenu, split_tabs};
