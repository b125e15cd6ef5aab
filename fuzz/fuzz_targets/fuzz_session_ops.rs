#![no_main]

use std::rc::Rc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use perch_core::geometry::{BoundingBox, Size};
use perch_layout::PlacementPreferences;
use perch_runtime::testing::MeasureStub;
use perch_runtime::{Host, Measure, OpenRequest, PlacementController, SessionPhase};

#[derive(Debug, Arbitrary)]
enum Op {
    Open,
    Close,
    Frame,
    Scroll,
    Resize(u16, u16),
    RenderPanel(Option<(u16, u16)>),
    MoveAnchor(Option<(i16, i16)>),
    Refresh,
}

fuzz_target!(|ops: Vec<Op>| {
    let host = Host::new(Size::new(1024.0, 768.0));
    let ctl = PlacementController::new(host.clone());
    let stub = Rc::new(MeasureStub::with_anchor(BoundingBox::new(
        100.0, 100.0, 40.0, 20.0,
    )));

    for op in ops.iter().take(256) {
        match *op {
            Op::Open => ctl.open(OpenRequest::new(
                Rc::clone(&stub) as Rc<dyn Measure>,
                PlacementPreferences::default(),
                Size::new(200.0, 300.0),
            )),
            Op::Close => ctl.close(),
            Op::Frame => {
                host.run_frame();
            }
            Op::Scroll => {
                host.scroll();
            }
            Op::Resize(w, h) => {
                host.resize(Size::new(f64::from(w), f64::from(h)));
            }
            Op::RenderPanel(size) => stub.set_panel(
                size.map(|(w, h)| BoundingBox::new(0.0, 0.0, f64::from(w), f64::from(h))),
            ),
            Op::MoveAnchor(at) => stub.set_anchor(
                at.map(|(t, l)| BoundingBox::new(f64::from(t), f64::from(l), 40.0, 20.0)),
            ),
            Op::Refresh => ctl.refresh(),
        }

        let snap = ctl.snapshot();
        let listeners = host.events().listener_count();
        match snap.phase {
            SessionPhase::Positioned => assert_eq!(listeners, 2),
            _ => assert_eq!(listeners, 0),
        }
        if snap.phase == SessionPhase::Closed {
            assert!(snap.position.is_none());
        }
        if snap.is_positioned {
            assert_eq!(snap.phase, SessionPhase::Positioned);
        }
    }

    drop(ctl);
    assert_eq!(host.events().listener_count(), 0);
});
