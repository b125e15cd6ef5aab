#![forbid(unsafe_code)]

//! Session lifecycle for anchored floating panels.
//!
//! The runtime is single-threaded and host-driven: the embedding
//! environment owns a [`Host`], pushes viewport changes into it
//! ([`Host::resize`], [`Host::scroll`]) and ticks rendering frames
//! ([`Host::run_frame`]). A [`PlacementController`] drives the placement
//! solver through one open/close session at a time:
//!
//! ```text
//!  Closed ──open()──▶ Opening ──next frame, panel measured──▶ Positioned
//!    ▲                  │                                      │  ▲
//!    └──── close() ─────┴──────────────── close() ─────────────┘  │
//!                                               scroll / resize ──┘
//! ```
//!
//! Consumers read the latest [`PlacementSnapshot`] and only show the panel
//! once `is_positioned` is true.

pub mod controller;
pub mod events;
pub mod frame;
pub mod host;
pub mod measure;
mod reactive;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use controller::{
    ControllerConfig, DEFAULT_MAX_MEASURE_FRAMES, OpenRequest, PanelSizeEstimate,
    PlacementController, PlacementSnapshot, SessionPhase,
};
pub use events::{ListenerId, ViewportEvents, ViewportSignal};
pub use frame::{FrameRequestId, FrameScheduler};
pub use host::Host;
pub use measure::{Measure, MeasureFn, measure_fn};
pub use reactive::Subscription;
