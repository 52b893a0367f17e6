//! Reactive state management

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Handle returned by [`State::subscribe`], used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

type Listener = Rc<dyn Fn()>;

struct Inner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(Subscription, Listener)>>,
    next_subscription: std::cell::Cell<u64>,
}

/// Reactive state container - notifies subscribers when changed.
///
/// Everything runs on one event loop, so the container is `Rc`/`RefCell`
/// based and cheap to clone; clones share the same value.
pub struct State<T: 'static> {
    inner: Rc<Inner<T>>,
}

impl<T: 'static> State<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(initial),
                listeners: RefCell::new(Vec::new()),
                next_subscription: std::cell::Cell::new(1),
            }),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Read the value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Set a new value and notify listeners
    pub fn set(&self, new_value: T) {
        *self.inner.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Update value with a function
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.inner.value.borrow_mut());
        self.notify();
        result
    }

    /// Subscribe to changes
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let id = Subscription(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Remove a listener; returns false if it was already gone
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        listeners.len() != before
    }

    pub fn downgrade(&self) -> WeakState<T> {
        WeakState { inner: Rc::downgrade(&self.inner) }
    }

    /// True if both handles share the same value
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self) {
        // Listeners may subscribe or read the value again, so run them on a snapshot
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl<T: 'static> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug + 'static> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("State").field(&*self.inner.value.borrow()).finish()
    }
}

/// Non-owning handle to a [`State`]
pub struct WeakState<T: 'static> {
    inner: Weak<Inner<T>>,
}

impl<T: 'static> WeakState<T> {
    pub fn upgrade(&self) -> Option<State<T>> {
        self.inner.upgrade().map(|inner| State { inner })
    }
}

impl<T: 'static> Clone for WeakState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T: 'static> Default for WeakState<T> {
    fn default() -> Self {
        Self { inner: Weak::new() }
    }
}

impl<T: 'static> std::fmt::Debug for WeakState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WeakState")
    }
}
