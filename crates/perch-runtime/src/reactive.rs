#![forbid(unsafe_code)]

//! Change-notified cell the controller publishes snapshots through.
//!
//! Callbacks are stored weakly. The [`Subscription`] handed back to the
//! caller owns the callback, so dropping it detaches; dead entries are
//! pruned on the next change. Writing an equal value notifies nobody, and
//! no borrow is held while callbacks run, so a callback may call back into
//! the controller.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

pub(crate) struct Observable<T> {
    value: RefCell<T>,
    callbacks: RefCell<Vec<Weak<Callback<T>>>>,
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            callbacks: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Store `value` and notify in registration order. False if unchanged.
    pub(crate) fn set(&self, value: T) -> bool {
        if *self.value.borrow() == value {
            return false;
        }
        self.value.replace(value.clone());

        let live: Vec<Rc<Callback<T>>> = {
            let mut callbacks = self.callbacks.borrow_mut();
            callbacks.retain(|cb| cb.strong_count() > 0);
            callbacks.iter().filter_map(Weak::upgrade).collect()
        };
        tracing::trace!(subscribers = live.len(), "snapshot published");
        for cb in &live {
            cb(&value);
        }
        true
    }

    pub(crate) fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: Rc<Callback<T>> = Rc::new(callback);
        self.callbacks.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _callback: Box::new(strong),
        }
    }

    #[cfg(test)]
    fn registered(&self) -> usize {
        self.callbacks.borrow().len()
    }
}

/// Keeps a snapshot callback attached; drop it to stop receiving updates.
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
