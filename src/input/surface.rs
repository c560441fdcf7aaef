//! Listener registry for one gesture surface.
//!
//! A view owns a [`TouchSurface`] and attaches controllers to it when it
//! mounts. Each attachment returns a [`Subscription`]; dropping the
//! subscription (typically when the view unmounts) detaches the listener, so a
//! controller can never keep receiving events for a view that is gone.

use super::events::{Dispatch, Propagation, TouchEvent};
use futures_util::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Receives touch events from a [`TouchSurface`].
pub trait TouchListener {
    fn on_touch(&self, event: &TouchEvent) -> Dispatch;
}

type Listeners = RefCell<Vec<(u64, Rc<dyn TouchListener>)>>;

/// Fans touch events out to attached listeners in attach order.
#[derive(Default)]
pub struct TouchSurface {
    listeners: Rc<Listeners>,
    next_id: Cell<u64>,
}

/// Result of dispatching one event to every listener.
#[derive(Default)]
pub struct SurfaceResponse {
    /// True when any listener consumed the event.
    pub default_prevented: bool,
    /// Asynchronous work started by listeners, in attach order.
    pub tasks: Vec<LocalBoxFuture<'static, ()>>,
}

impl fmt::Debug for SurfaceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceResponse")
            .field("default_prevented", &self.default_prevented)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl TouchSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a listener until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription detaches the listener immediately"]
    pub fn attach(&self, listener: Rc<dyn TouchListener>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));
        tracing::debug!(listener_id = id, "listener attached");

        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Delivers `event` to every attached listener.
    ///
    /// The listener list is snapshotted first, so listeners may attach or
    /// detach other listeners while handling the event.
    pub fn dispatch(&self, event: &TouchEvent) -> SurfaceResponse {
        let snapshot: Vec<Rc<dyn TouchListener>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        let mut propagation = Propagation::Ignored;
        let mut tasks = Vec::new();

        for listener in snapshot {
            let dispatch = listener.on_touch(event);
            propagation = propagation.or(dispatch.propagation);
            tasks.extend(dispatch.task);
        }

        SurfaceResponse {
            default_prevented: propagation.is_consumed(),
            tasks,
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl fmt::Debug for TouchSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchSurface")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a listener attached to its surface for as long as it lives.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    /// Detaches now. Equivalent to dropping the subscription.
    pub fn detach(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        // Dispatch iterates a snapshot, so the list is never borrowed here mid-dispatch.
        listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        tracing::debug!(listener_id = self.id, "listener detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    #[derive(Default)]
    struct Counter {
        seen: Cell<usize>,
        consume: bool,
    }

    impl TouchListener for Counter {
        fn on_touch(&self, _event: &TouchEvent) -> Dispatch {
            self.seen.set(self.seen.get() + 1);
            if self.consume {
                Dispatch::from_propagation(Propagation::Consumed)
            } else {
                Dispatch::ignored()
            }
        }
    }

    #[test]
    fn dropping_subscription_detaches() {
        let surface = TouchSurface::new();
        let counter = Rc::new(Counter::default());

        let subscription = surface.attach(counter.clone());
        surface.dispatch(&TouchEvent::start(Point::new(0.0, 0.0)));
        assert_eq!(surface.listener_count(), 1);

        drop(subscription);
        surface.dispatch(&TouchEvent::end());

        assert_eq!(surface.listener_count(), 0);
        assert_eq!(counter.seen.get(), 1);
    }

    #[test]
    fn any_consumer_prevents_default() {
        let surface = TouchSurface::new();
        let _a = surface.attach(Rc::new(Counter::default()));
        let _b = surface.attach(Rc::new(Counter {
            consume: true,
            ..Counter::default()
        }));

        let response = surface.dispatch(&TouchEvent::moved(Point::new(5.0, 5.0)));
        assert!(response.default_prevented);
        assert!(response.tasks.is_empty());
    }

    #[test]
    fn subscription_outliving_surface_is_harmless() {
        let surface = TouchSurface::new();
        let subscription = surface.attach(Rc::new(Counter::default()));
        drop(surface);
        subscription.detach();
    }
}
