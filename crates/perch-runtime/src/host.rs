#![forbid(unsafe_code)]

//! Host environment: viewport size, viewport events and frames.
//!
//! The embedding environment pushes size changes and scroll notifications
//! in and ticks frames explicitly, so every lifecycle step is deterministic
//! and testable without a real window.

use std::cell::Cell;
use std::rc::Rc;

use perch_core::geometry::ViewportSize;

use crate::events::{ViewportEvents, ViewportSignal};
use crate::frame::FrameScheduler;

/// Shared handle to the viewport and its event/frame plumbing.
#[derive(Debug, Clone)]
pub struct Host {
    viewport: Rc<Cell<ViewportSize>>,
    events: ViewportEvents,
    frames: FrameScheduler,
}

impl Host {
    /// Create a host with the given viewport size.
    #[must_use]
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            viewport: Rc::new(Cell::new(viewport)),
            events: ViewportEvents::new(),
            frames: FrameScheduler::new(),
        }
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> ViewportSize {
        self.viewport.get()
    }

    /// Change the viewport size and emit [`ViewportSignal::Resize`].
    ///
    /// Returns the number of listeners notified.
    pub fn resize(&self, viewport: ViewportSize) -> usize {
        self.viewport.set(viewport);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport resized"
        );
        self.events.emit(ViewportSignal::Resize)
    }

    /// Emit [`ViewportSignal::Scroll`]. Returns the number of listeners notified.
    pub fn scroll(&self) -> usize {
        self.events.emit(ViewportSignal::Scroll)
    }

    /// Run one rendering frame. Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        self.frames.run_frame()
    }

    /// Viewport listener registry.
    #[must_use]
    pub fn events(&self) -> &ViewportEvents {
        &self.events
    }

    /// Frame scheduler.
    #[must_use]
    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perch_core::geometry::Size;

    #[test]
    fn resize_updates_size_and_notifies() {
        let host = Host::new(Size::new(800.0, 600.0));
        let seen = Rc::new(Cell::new(Size::ZERO));
        let h = host.clone();
        let s = Rc::clone(&seen);
        host.events()
            .listen(ViewportSignal::Resize, move || s.set(h.viewport_size()));

        assert_eq!(host.resize(Size::new(1024.0, 768.0)), 1);
        assert_eq!(seen.get(), Size::new(1024.0, 768.0));
    }

    #[test]
    fn scroll_without_listeners_is_harmless() {
        let host = Host::new(Size::new(800.0, 600.0));
        assert_eq!(host.scroll(), 0);
    }

    #[test]
    fn clones_share_state() {
        let host = Host::new(Size::new(800.0, 600.0));
        let other = host.clone();
        other.resize(Size::new(640.0, 480.0));
        assert_eq!(host.viewport_size(), Size::new(640.0, 480.0));
        other.frames().request(|| {});
        assert_eq!(host.frames().pending(), 1);
    }
}
