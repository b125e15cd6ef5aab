#![forbid(unsafe_code)]

//! Placement session controller.
//!
//! A [`PlacementController`] owns one floating panel's placement across
//! open/close sessions and publishes a [`PlacementSnapshot`] to its
//! subscribers whenever the snapshot changes.
//!
//! # Lifecycle
//!
//! - **Closed**: no session, no listeners, `position = None`.
//! - **Opening**: entered by [`PlacementController::open`]. A first result
//!   is computed from the caller's size estimate (if the anchor is
//!   mounted) and a re-measurement is requested for the next frame.
//! - **Positioned**: entered once a frame callback has measured the
//!   rendered panel. `is_positioned` becomes true and scroll/resize
//!   listeners are registered; every signal recomputes synchronously.
//! - [`PlacementController::close`] releases listeners and resets state
//!   from any phase.
//!
//! # Staleness
//!
//! Every session gets a fresh epoch. Frame callbacks and listeners capture
//! the epoch they were created under and do nothing if it no longer
//! matches, so closing (or closing and reopening) before a deferred
//! measurement lands makes that measurement a no-op.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use perch_core::geometry::Size;
use perch_layout::{PlacementPreferences, PlacementResult, place};
use tracing::{debug, debug_span, trace, warn};
use web_time::Instant;

use crate::events::{ListenerId, ViewportSignal};
use crate::host::Host;
use crate::measure::Measure;
use crate::reactive::{Observable, Subscription};

/// Frames to wait for a measurable session before warning about it.
pub const DEFAULT_MAX_MEASURE_FRAMES: u32 = 8;

/// Controller tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Frames without a mounted anchor and rendered panel before the
    /// controller logs a warning. It keeps retrying afterwards and stays
    /// unpositioned until both can be measured or the session closes.
    pub max_measure_frames: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_measure_frames: DEFAULT_MAX_MEASURE_FRAMES,
        }
    }
}

impl ControllerConfig {
    /// Validate; empty means valid.
    #[must_use]
    pub fn validate(&self, prefix: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_measure_frames == 0 {
            errors.push(format!("{prefix}.max_measure_frames must be > 0"));
        }
        errors
    }
}

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No session.
    Closed,
    /// Open, waiting for the panel to be measured.
    Opening,
    /// Open and placed from a real measurement; tracking viewport changes.
    Positioned,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Positioned => "positioned",
        })
    }
}

/// The panel size used for placement.
///
/// Once a session has `Measured`, it never goes back to `Estimated`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelSizeEstimate {
    /// Caller-supplied size, used until the panel is laid out.
    Estimated(Size),
    /// The panel's rendered size.
    Measured(Size),
}

impl PanelSizeEstimate {
    /// The size either way.
    pub fn size(&self) -> Size {
        match *self {
            Self::Estimated(s) | Self::Measured(s) => s,
        }
    }

    /// Whether this came from a real measurement.
    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }
}

/// What consumers observe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSnapshot {
    /// Session id; increments on every open and every close.
    pub session: u64,
    /// Current phase.
    pub phase: SessionPhase,
    /// Latest result, `None` before the first computation of a session.
    pub position: Option<PlacementResult>,
    /// Panel size the latest result was computed with.
    pub panel_size: Size,
    /// True only once placed from the real panel size. Gate visibility on this.
    pub is_positioned: bool,
}

impl PlacementSnapshot {
    const fn closed(session: u64) -> Self {
        Self {
            session,
            phase: SessionPhase::Closed,
            position: None,
            panel_size: Size::ZERO,
            is_positioned: false,
        }
    }
}

/// Everything [`PlacementController::open`] needs for one session.
#[derive(Clone)]
pub struct OpenRequest {
    /// Anchor/panel measurement handle.
    pub measure: Rc<dyn Measure>,
    /// Solver settings for this panel.
    pub preferences: PlacementPreferences,
    /// Panel size to assume before the panel is rendered.
    pub estimate: Size,
}

impl fmt::Debug for OpenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRequest")
            .field("preferences", &self.preferences)
            .field("estimate", &self.estimate)
            .finish_non_exhaustive()
    }
}

impl OpenRequest {
    /// Bundle a session request.
    pub fn new(
        measure: Rc<dyn Measure>,
        preferences: PlacementPreferences,
        estimate: Size,
    ) -> Self {
        Self {
            measure,
            preferences,
            estimate,
        }
    }
}

/// Why a computation ran. Recorded on the compute span.
#[derive(Debug, Clone, Copy)]
enum Pass {
    Estimate,
    Measure,
    Signal(ViewportSignal),
    Refresh,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Estimate => f.write_str("estimate"),
            Self::Measure => f.write_str("measure"),
            Self::Signal(signal) => write!(f, "{signal}"),
            Self::Refresh => f.write_str("refresh"),
        }
    }
}

struct Session {
    measure: Rc<dyn Measure>,
    preferences: PlacementPreferences,
    panel: PanelSizeEstimate,
    frames_waited: u32,
    listeners: Vec<ListenerId>,
}

struct State {
    epoch: u64,
    phase: SessionPhase,
    session: Option<Session>,
    position: Option<PlacementResult>,
}

struct Shared {
    host: Host,
    config: ControllerConfig,
    state: RefCell<State>,
    output: Observable<PlacementSnapshot>,
}

/// Drives placement for one floating panel.
///
/// Independent controllers share nothing but the [`Host`]. Dropping a
/// controller closes its session.
pub struct PlacementController {
    shared: Rc<Shared>,
}

impl fmt::Debug for PlacementController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacementController")
            .field("snapshot", &self.snapshot())
            .field("tracking", &self.is_tracking())
            .finish()
    }
}

impl PlacementController {
    /// Create a closed controller with default config.
    #[must_use]
    pub fn new(host: Host) -> Self {
        Self::with_config(host, ControllerConfig::default())
    }

    /// Create a closed controller.
    #[must_use]
    pub fn with_config(host: Host, config: ControllerConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                host,
                config,
                state: RefCell::new(State {
                    epoch: 0,
                    phase: SessionPhase::Closed,
                    session: None,
                    position: None,
                }),
                output: Observable::new(PlacementSnapshot::closed(0)),
            }),
        }
    }

    /// Start a session. Does nothing if one is already open.
    pub fn open(&self, request: OpenRequest) {
        let epoch = {
            let mut st = self.shared.state.borrow_mut();
            if st.phase != SessionPhase::Closed {
                debug!(session = st.epoch, "open ignored: session already open");
                return;
            }
            st.epoch += 1;
            st.phase = SessionPhase::Opening;
            st.position = None;
            st.session = Some(Session {
                measure: request.measure,
                preferences: request.preferences,
                panel: PanelSizeEstimate::Estimated(request.estimate),
                frames_waited: 0,
                listeners: Vec::new(),
            });
            st.epoch
        };
        debug!(
            session = epoch,
            estimate_width = request.estimate.width,
            estimate_height = request.estimate.height,
            "placement session opened"
        );

        self.shared.recompute(epoch, Pass::Estimate, false);
        self.shared.publish();
        Shared::request_measure(&self.shared, epoch);
    }

    /// End the session, releasing listeners. Does nothing if closed.
    pub fn close(&self) {
        self.shared.close();
    }

    /// Follow an open flag: open on false→true, close on true→false.
    ///
    /// `request` is only called when a session actually starts.
    pub fn set_open(&self, open: bool, request: impl FnOnce() -> OpenRequest) {
        match (open, self.is_open()) {
            (true, false) => self.open(request()),
            (false, true) => self.close(),
            _ => {}
        }
    }

    /// Recompute now, as a viewport signal would.
    ///
    /// While opening this uses the estimate; once positioned it re-reads
    /// the rendered panel size too.
    pub fn refresh(&self) {
        let (epoch, phase) = {
            let st = self.shared.state.borrow();
            (st.epoch, st.phase)
        };
        if phase == SessionPhase::Closed {
            return;
        }
        let positioned = phase == SessionPhase::Positioned;
        if self.shared.recompute(epoch, Pass::Refresh, positioned) {
            self.shared.publish();
        }
    }

    /// Whether a session is open (Opening or Positioned).
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase() != SessionPhase::Closed
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.shared.state.borrow().phase
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> PlacementSnapshot {
        self.shared.output.get()
    }

    /// Latest result, if any.
    #[must_use]
    pub fn position(&self) -> Option<PlacementResult> {
        self.snapshot().position
    }

    /// Whether the panel may be shown.
    #[must_use]
    pub fn is_positioned(&self) -> bool {
        self.snapshot().is_positioned
    }

    /// Whether scroll/resize listeners are currently held.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.shared
            .state
            .borrow()
            .session
            .as_ref()
            .is_some_and(|s| !s.listeners.is_empty())
    }

    /// Be told about every snapshot change.
    pub fn subscribe(&self, callback: impl Fn(&PlacementSnapshot) + 'static) -> Subscription {
        self.shared.output.subscribe(callback)
    }

    /// The host this controller reads from.
    #[must_use]
    pub fn host(&self) -> &Host {
        &self.shared.host
    }
}

impl Drop for PlacementController {
    fn drop(&mut self) {
        self.shared.close();
    }
}

impl Shared {
    /// Schedule the accurate measurement for `epoch` on the next frame.
    fn request_measure(this: &Rc<Self>, epoch: u64) {
        let weak: Weak<Self> = Rc::downgrade(this);
        this.host.frames().request(move || {
            if let Some(shared) = weak.upgrade() {
                Self::on_frame(&shared, epoch);
            }
        });
    }

    fn on_frame(this: &Rc<Self>, epoch: u64) {
        let (measure, waited) = {
            let st = this.state.borrow();
            let Some(session) = st.session.as_ref() else {
                trace!(session = epoch, "stale frame ignored");
                return;
            };
            if st.epoch != epoch || st.phase != SessionPhase::Opening {
                trace!(session = epoch, "stale frame ignored");
                return;
            }
            (Rc::clone(&session.measure), session.frames_waited + 1)
        };

        let anchor_ready = measure.anchor_box().is_some();
        let panel = measure.panel_box().map(|b| b.size());

        let Some(measured) = panel.filter(|_| anchor_ready) else {
            if waited == this.config.max_measure_frames {
                warn!(
                    session = epoch,
                    frames = waited,
                    anchor_ready,
                    "still not measurable; staying unpositioned"
                );
            } else {
                trace!(
                    session = epoch,
                    frames = waited,
                    anchor_ready,
                    "measurement not ready; retrying next frame"
                );
            }
            if let Some(session) = this.state.borrow_mut().session.as_mut() {
                session.frames_waited = waited;
            }
            Self::request_measure(this, epoch);
            return;
        };

        if let Some(session) = this.state.borrow_mut().session.as_mut() {
            session.panel = PanelSizeEstimate::Measured(measured);
        }

        if !this.recompute(epoch, Pass::Measure, false) {
            // Anchor vanished between the readiness check and the compute.
            Self::request_measure(this, epoch);
            return;
        }
        this.state.borrow_mut().phase = SessionPhase::Positioned;
        Self::start_tracking(this, epoch);
        this.publish();
    }

    fn start_tracking(this: &Rc<Self>, epoch: u64) {
        let ids: Vec<ListenerId> = [ViewportSignal::Scroll, ViewportSignal::Resize]
            .into_iter()
            .map(|signal| {
                let weak: Weak<Self> = Rc::downgrade(this);
                this.host.events().listen(signal, move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.on_signal(epoch, signal);
                    }
                })
            })
            .collect();
        debug!(session = epoch, listeners = ids.len(), "tracking viewport");
        if let Some(session) = this.state.borrow_mut().session.as_mut() {
            session.listeners = ids;
        }
    }

    fn on_signal(&self, epoch: u64, signal: ViewportSignal) {
        {
            let st = self.state.borrow();
            if st.epoch != epoch || st.phase != SessionPhase::Positioned {
                return;
            }
        }
        if self.recompute(epoch, Pass::Signal(signal), true) {
            self.publish();
        }
    }

    /// Run the solver for `epoch`. Returns false if nothing was computed.
    ///
    /// With `remeasure_panel`, a fresh rendered size replaces the stored
    /// one; a missing box keeps whatever the session already had.
    fn recompute(&self, epoch: u64, pass: Pass, remeasure_panel: bool) -> bool {
        let started = Instant::now();
        let span = debug_span!(
            "perch.placement.compute",
            session = epoch,
            pass = %pass,
            duration_us = tracing::field::Empty
        );
        let _guard = span.enter();

        let (measure, preferences, mut panel) = {
            let st = self.state.borrow();
            match st.session.as_ref() {
                Some(s) if st.epoch == epoch => (Rc::clone(&s.measure), s.preferences, s.panel),
                _ => return false,
            }
        };

        let Some(anchor) = measure.anchor_box() else {
            trace!("anchor unavailable; keeping previous position");
            return false;
        };
        if remeasure_panel && let Some(rendered) = measure.panel_box() {
            panel = PanelSizeEstimate::Measured(rendered.size());
        }

        let viewport = self.host.viewport_size();
        let result = place(anchor, panel.size(), viewport, &preferences);

        {
            let mut st = self.state.borrow_mut();
            if st.epoch != epoch {
                return false;
            }
            if let Some(session) = st.session.as_mut() {
                session.panel = panel;
            }
            st.position = Some(result);
        }

        let duration_us = started.elapsed().as_micros() as u64;
        span.record("duration_us", duration_us);
        trace!(
            top = result.top,
            left = result.left,
            vertical = ?result.vertical,
            horizontal = ?result.horizontal,
            measured = panel.is_measured(),
            "placement computed"
        );
        true
    }

    fn close(&self) {
        let (epoch, listeners) = {
            let mut st = self.state.borrow_mut();
            if st.phase == SessionPhase::Closed {
                return;
            }
            st.epoch += 1;
            st.phase = SessionPhase::Closed;
            st.position = None;
            let listeners = st.session.take().map(|s| s.listeners).unwrap_or_default();
            (st.epoch, listeners)
        };
        let released = listeners
            .into_iter()
            .filter(|id| self.host.events().unlisten(*id))
            .count();
        debug!(session = epoch, released, "placement session closed");
        self.publish();
    }

    fn publish(&self) {
        let snapshot = {
            let st = self.state.borrow();
            match st.session.as_ref() {
                None => PlacementSnapshot::closed(st.epoch),
                Some(session) => PlacementSnapshot {
                    session: st.epoch,
                    phase: st.phase,
                    position: st.position,
                    panel_size: session.panel.size().sanitized(),
                    is_positioned: st.phase == SessionPhase::Positioned && st.position.is_some(),
                },
            }
        };
        self.output.set(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MeasureStub;
    use perch_core::geometry::BoundingBox;
    use perch_layout::VerticalSide;

    fn host() -> Host {
        Host::new(Size::new(1024.0, 768.0))
    }

    fn request(stub: &Rc<MeasureStub>) -> OpenRequest {
        OpenRequest::new(
            Rc::clone(stub) as Rc<dyn Measure>,
            PlacementPreferences::default(),
            Size::new(200.0, 300.0),
        )
    }

    #[test]
    fn starts_closed() {
        let ctl = PlacementController::new(host());
        let snap = ctl.snapshot();
        assert_eq!(snap.phase, SessionPhase::Closed);
        assert!(snap.position.is_none());
        assert!(!snap.is_positioned);
        assert!(!ctl.is_tracking());
    }

    #[test]
    fn open_computes_estimate_without_positioning() {
        let host = host();
        let ctl = PlacementController::new(host.clone());
        let stub = Rc::new(MeasureStub::with_anchor(BoundingBox::new(
            700.0, 10.0, 40.0, 20.0,
        )));
        ctl.open(request(&stub));

        let snap = ctl.snapshot();
        assert_eq!(snap.phase, SessionPhase::Opening);
        assert!(!snap.is_positioned);
        let pos = snap.position.expect("estimate computed");
        assert_eq!(pos.vertical, VerticalSide::Above);
        assert_eq!(pos.top, 396.0);
        assert_eq!(host.frames().pending(), 1);
        assert_eq!(host.events().listener_count(), 0);
    }

    #[test]
    fn next_frame_uses_rendered_size() {
        let host = host();
        let ctl = PlacementController::new(host.clone());
        let stub = Rc::new(MeasureStub::with_anchor(BoundingBox::new(
            700.0, 10.0, 40.0, 20.0,
        )));
        ctl.open(request(&stub));
        stub.set_panel(Some(BoundingBox::new(-9999.0, -9999.0, 180.0, 40.0)));
        host.run_frame();

        let snap = ctl.snapshot();
        assert_eq!(snap.phase, SessionPhase::Positioned);
        assert!(snap.is_positioned);
        assert_eq!(snap.panel_size, Size::new(180.0, 40.0));
        // 40 tall fits in the 48px below the anchor; the padding clamp
        // pulls it up from 724 to 768 - 40 - 8.
        let pos = snap.position.unwrap();
        assert_eq!(pos.vertical, VerticalSide::Below);
        assert_eq!(pos.top, 720.0);
        assert!(ctl.is_tracking());
        assert_eq!(host.events().listener_count(), 2);
    }

    #[test]
    fn missing_anchor_leaves_position_empty() {
        let host = host();
        let ctl = PlacementController::new(host.clone());
        let stub = Rc::new(MeasureStub::default());
        ctl.open(request(&stub));
        assert!(ctl.position().is_none());

        host.run_frame();
        assert_eq!(ctl.phase(), SessionPhase::Opening);
        assert!(ctl.position().is_none());
        // Still waiting for the anchor.
        assert_eq!(host.frames().pending(), 1);

        stub.set_anchor(Some(BoundingBox::new(10.0, 10.0, 10.0, 10.0)));
        stub.set_panel(Some(BoundingBox::new(0.0, 0.0, 50.0, 50.0)));
        host.run_frame();
        assert!(ctl.is_positioned());
    }

    #[test]
    fn unrendered_panel_is_never_positioned_from_estimate() {
        let host = host();
        let ctl = PlacementController::with_config(
            host.clone(),
            ControllerConfig {
                max_measure_frames: 3,
            },
        );
        let stub = Rc::new(MeasureStub::with_anchor(BoundingBox::new(
            10.0, 10.0, 10.0, 10.0,
        )));
        ctl.open(request(&stub));
        for _ in 0..8 {
            host.run_frame();
        }

        let snap = ctl.snapshot();
        assert_eq!(snap.phase, SessionPhase::Opening);
        assert!(!snap.is_positioned);
        assert_eq!(snap.panel_size, Size::new(200.0, 300.0));
        assert_eq!(host.frames().pending(), 1);
        assert_eq!(host.events().listener_count(), 0);

        stub.set_panel(Some(BoundingBox::new(0.0, 0.0, 50.0, 40.0)));
        host.run_frame();
        let snap = ctl.snapshot();
        assert!(snap.is_positioned);
        assert_eq!(snap.panel_size, Size::new(50.0, 40.0));
        assert_eq!(host.frames().pending(), 0);
    }

    #[test]
    fn close_before_frame_discards_measurement() {
        let host = host();
        let ctl = PlacementController::new(host.clone());
        let stub = Rc::new(MeasureStub::with_anchor(BoundingBox::new(
            10.0, 10.0, 10.0, 10.0,
        )));
        stub.set_panel(Some(BoundingBox::new(0.0, 0.0, 50.0, 50.0)));
        ctl.open(request(&stub));
        ctl.close();
        host.run_frame();

        assert_eq!(ctl.phase(), SessionPhase::Closed);
        assert!(ctl.position().is_none());
        assert_eq!(host.events().listener_count(), 0);
    }

    #[test]
    fn open_twice_is_ignored() {
        let host = host();
        let ctl = PlacementController::new(host.clone());
        let stub = Rc::new(MeasureStub::with_anchor(BoundingBox::new(
            10.0, 10.0, 10.0, 10.0,
        )));
        ctl.open(request(&stub));
        let session = ctl.snapshot().session;
        ctl.open(request(&stub));
        assert_eq!(ctl.snapshot().session, session);
        assert_eq!(host.frames().pending(), 1);
    }

    #[test]
    fn set_open_follows_transitions() {
        let host = host();
        let ctl = PlacementController::new(host.clone());
        let stub = Rc::new(MeasureStub::with_anchor(BoundingBox::new(
            10.0, 10.0, 10.0, 10.0,
        )));
        let mut built = 0;
        ctl.set_open(true, || {
            built += 1;
            request(&stub)
        });
        ctl.set_open(true, || {
            built += 1;
            request(&stub)
        });
        assert_eq!(built, 1);
        assert!(ctl.is_open());
        ctl.set_open(false, || request(&stub));
        assert!(!ctl.is_open());
    }

    #[test]
    fn drop_releases_listeners() {
        let host = host();
        let stub = Rc::new(MeasureStub::with_anchor(BoundingBox::new(
            10.0, 10.0, 10.0, 10.0,
        )));
        stub.set_panel(Some(BoundingBox::new(0.0, 0.0, 50.0, 50.0)));
        {
            let ctl = PlacementController::new(host.clone());
            ctl.open(request(&stub));
            host.run_frame();
            assert_eq!(host.events().listener_count(), 2);
        }
        assert_eq!(host.events().listener_count(), 0);
    }

    #[test]
    fn refresh_recomputes_after_anchor_moves() {
        let host = host();
        let ctl = PlacementController::new(host.clone());
        let stub = Rc::new(MeasureStub::with_anchor(BoundingBox::new(
            10.0, 10.0, 10.0, 10.0,
        )));
        stub.set_panel(Some(BoundingBox::new(0.0, 0.0, 50.0, 50.0)));
        ctl.open(request(&stub));
        host.run_frame();
        assert_eq!(ctl.position().unwrap().left, 10.0);

        stub.set_anchor(Some(BoundingBox::new(10.0, 300.0, 10.0, 10.0)));
        ctl.refresh();
        assert_eq!(ctl.position().unwrap().left, 300.0);
    }

    #[test]
    fn closed_snapshot_carries_new_session_id() {
        let host = host();
        let ctl = PlacementController::new(host.clone());
        let stub = Rc::new(MeasureStub::with_anchor(BoundingBox::new(
            10.0, 10.0, 10.0, 10.0,
        )));
        ctl.open(request(&stub));
        assert_eq!(ctl.snapshot().session, 1);
        ctl.close();
        assert_eq!(ctl.snapshot().session, 2);
        assert_eq!(ctl.snapshot(), PlacementSnapshot::closed(2));
    }
}
