//! Event Dispatcher
//! Explicit handler registration; dropping the returned `Subscription`
//! removes the handler.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler<E> = Box<dyn FnMut(&E)>;

struct Registry<E> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
}

/// Single-threaded fan-out of events to registered handlers.
///
/// Handlers must not subscribe or emit on the same dispatcher while they run.
pub struct Dispatcher<E> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E> Default for Dispatcher<E> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }
}

impl<E: 'static> Dispatcher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&E) + 'static,
    {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.handlers.push((id, Box::new(handler)));
            id
        };

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().handlers.retain(|(h, _)| *h != id);
                }
            })),
        }
    }

    pub fn emit(&self, event: &E) {
        for (_, handler) in self.registry.borrow_mut().handlers.iter_mut() {
            handler(event);
        }
    }

    #[cfg(test)]
    pub fn handler_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

/// Registration handle; the handler stays active until this is dropped.
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_all_handlers() {
        let dispatcher: Dispatcher<u32> = Dispatcher::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = {
            let seen = seen.clone();
            dispatcher.subscribe(move |e| seen.borrow_mut().push(("a", *e)))
        };
        let b = {
            let seen = seen.clone();
            dispatcher.subscribe(move |e| seen.borrow_mut().push(("b", *e)))
        };

        dispatcher.emit(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
        drop((a, b));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let dispatcher: Dispatcher<u32> = Dispatcher::new();
        let count = Rc::new(RefCell::new(0));

        let subscription = {
            let count = count.clone();
            dispatcher.subscribe(move |_| *count.borrow_mut() += 1)
        };
        dispatcher.emit(&1);
        drop(subscription);
        dispatcher.emit(&2);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(dispatcher.handler_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_dispatcher() {
        let dispatcher: Dispatcher<u32> = Dispatcher::new();
        let subscription = dispatcher.subscribe(|_| {});
        drop(dispatcher);
        drop(subscription);
    }
}
