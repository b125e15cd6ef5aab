#![forbid(unsafe_code)]

//! Next-frame callback queue.
//!
//! Mirrors the host's animation-frame hook: callbacks requested now run
//! when the host ticks the next frame, after layout has happened.
//! Callbacks requested *during* a frame run on the following one.
//! Requests cannot be cancelled; callbacks are expected to check whether
//! the work is still wanted when they run.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Identifier of a queued frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(u64);

type FrameCallback = Box<dyn FnOnce()>;

#[derive(Default)]
struct Queue {
    next_id: u64,
    pending: VecDeque<(FrameRequestId, FrameCallback)>,
}

/// Host-driven frame scheduler. Clones share the queue.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    queue: Rc<RefCell<Queue>>,
    frames: Rc<Cell<u64>>,
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("pending", &self.pending())
            .field("frame_count", &self.frame_count())
            .finish()
    }
}

impl FrameScheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `callback` for the next frame.
    pub fn request(&self, callback: impl FnOnce() + 'static) -> FrameRequestId {
        let mut q = self.queue.borrow_mut();
        q.next_id += 1;
        let id = FrameRequestId(q.next_id);
        q.pending.push_back((id, Box::new(callback)));
        id
    }

    /// Run one frame: every callback queued before this call, in order.
    ///
    /// Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<(FrameRequestId, FrameCallback)> =
            self.queue.borrow_mut().pending.drain(..).collect();
        let frame = self.frames.get() + 1;
        self.frames.set(frame);
        tracing::trace!(frame, callbacks = batch.len(), "frame");
        let ran = batch.len();
        for (_, cb) in batch {
            cb();
        }
        ran
    }

    /// Callbacks waiting for the next frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Frames run so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames.get()
    }
}
