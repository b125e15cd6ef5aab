#![forbid(unsafe_code)]

//! Viewport scroll/resize notifications.
//!
//! [`ViewportEvents`] is a single-threaded listener registry. Signals
//! carry no payload: listeners re-read whatever geometry they need.
//! Emission snapshots the listener list first, so a callback may register
//! or release listeners (including itself) without disturbing the
//! in-flight dispatch.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A viewport change that can invalidate a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportSignal {
    /// Any scroll container in the viewport scrolled.
    Scroll,
    /// The viewport changed size.
    Resize,
}

impl fmt::Display for ViewportSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
        })
    }
}

/// Handle returned by [`ViewportEvents::listen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, ViewportSignal, Listener)>,
}

/// Listener registry for viewport signals. Clones share the registry.
#[derive(Clone, Default)]
pub struct ViewportEvents {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for ViewportEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ViewportEvents {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `signal`.
    pub fn listen(&self, signal: ViewportSignal, callback: impl Fn() + 'static) -> ListenerId {
        let mut reg = self.registry.borrow_mut();
        reg.next_id += 1;
        let id = ListenerId(reg.next_id);
        reg.listeners.push((id, signal, Rc::new(callback)));
        tracing::trace!(listener = id.0, %signal, "viewport listener registered");
        id
    }

    /// Release a listener. Returns `false` if it was already gone.
    pub fn unlisten(&self, id: ListenerId) -> bool {
        let mut reg = self.registry.borrow_mut();
        let before = reg.listeners.len();
        reg.listeners.retain(|(lid, _, _)| *lid != id);
        let removed = reg.listeners.len() != before;
        if removed {
            tracing::trace!(listener = id.0, "viewport listener released");
        }
        removed
    }

    /// Invoke every listener registered for `signal`.
    ///
    /// Returns how many listeners were called.
    pub fn emit(&self, signal: ViewportSignal) -> usize {
        let targets: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|(_, s, _)| *s == signal)
            .map(|(_, _, cb)| Rc::clone(cb))
            .collect();
        for cb in &targets {
            cb();
        }
        targets.len()
    }

    /// Total registered listeners across all signals.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Registered listeners for one signal.
    #[must_use]
    pub fn listener_count_for(&self, signal: ViewportSignal) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|(_, s, _)| *s == signal)
            .count()
    }
}
