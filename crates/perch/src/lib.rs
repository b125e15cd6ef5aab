#![forbid(unsafe_code)]

//! Perch public facade crate.
//!
//! Viewport-aware placement for floating panels (dropdowns, context menus,
//! tab overflow menus). This crate re-exports the stable surface of the
//! internal crates and offers a prelude for day-to-day use.
//!
//! ```rust,ignore
//! use perch::prelude::*;
//!
//! let host = Host::new(Size::new(1024.0, 768.0));
//! let mut menu = DropdownMenu::new(host.clone(), measure, items);
//! menu.handle_key(KeyCode::Down);
//! host.run_frame();
//! if let Some(rect) = menu.panel().visible_rect() {
//!     // draw the panel at rect
//! }
//! ```

mod error;

// --- Core re-exports -------------------------------------------------------

pub use perch_core::event::{KeyCode, PointerButton};
pub use perch_core::geometry::{BoundingBox, Point, Size, Spaces, ViewportSize};

// --- Layout re-exports -----------------------------------------------------

pub use perch_layout::{
    DEFAULT_GAP, DEFAULT_VIEWPORT_PADDING, HorizontalAlignment, PlacementPreferences,
    PlacementResult, TransformOrigin, VerticalSide, place,
};

// --- Runtime re-exports ----------------------------------------------------

pub use perch_runtime::{
    ControllerConfig, Host, Measure, OpenRequest, PlacementController, PlacementSnapshot,
    SessionPhase, Subscription, measure_fn,
};

// --- Widget re-exports -----------------------------------------------------

pub use perch_widgets::{
    ConfigError, ContextMenu, DropdownMenu, FloatingPanel, Menu, MenuItem, MenuOutcome,
    PanelKind, PanelPreset, PerchConfig, TabEntry, TabOverflowMenu,
};

// --- Errors ----------------------------------------------------------------

pub use error::{Error, Result};

/// Load a [`PerchConfig`] from a `.toml` or `.json` file and validate it.
#[cfg(feature = "config")]
pub fn load_config(path: impl AsRef<std::path::Path>) -> Result<PerchConfig> {
    let path = path.as_ref();
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => PerchConfig::from_toml_file(path)?,
        Some(ext) if ext.eq_ignore_ascii_case("json") => PerchConfig::from_json_file(path)?,
        _ => return Err(Error::UnsupportedConfigFormat(path.to_path_buf())),
    };
    Ok(config.validated()?)
}

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BoundingBox, ContextMenu, DropdownMenu, Error, FloatingPanel, Host, KeyCode, Measure,
        MenuItem, MenuOutcome, PanelPreset, PerchConfig, PlacementController,
        PlacementPreferences, Point, PointerButton, Result, Size, TabEntry, TabOverflowMenu,
    };

    pub use crate::{core, layout, runtime, widgets};
}

pub use perch_core as core;
pub use perch_layout as layout;
pub use perch_runtime as runtime;
pub use perch_widgets as widgets;
