//! Observable value with explicit subscriptions
//!
//! A small subject type: `get`, `set`, and `subscribe` returning a handle
//! that detaches the callback when dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

/// A value that notifies subscribers on every `set`.
///
/// Callbacks run after the internal lock is released, so a callback may read
/// the observable it is subscribed to.
pub struct Observable<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T: Clone + Send + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        lock(&self.inner).value.clone()
    }

    /// Replace the value and notify every subscriber
    pub fn set(&self, value: T) {
        let (value, subscribers) = {
            let mut inner = lock(&self.inner);
            inner.value = value;
            let subscribers: Vec<Callback<T>> =
                inner.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect();
            (inner.value.clone(), subscribers)
        };

        for callback in subscribers {
            callback(&value);
        }
    }

    /// Register a callback. It is invoked immediately with the current value
    /// and again after every `set`, until the returned handle is dropped.
    #[must_use = "the callback is detached as soon as the subscription is dropped"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let (id, current) = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Arc::clone(&callback)));
            (id, inner.value.clone())
        };

        callback(&current);

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    lock(&inner).subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Number of attached subscribers
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }
}

impl<T: Default + Clone + Send + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Handle returned by [`Observable::subscribe`].
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Detach the callback now
    pub fn unsubscribe(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
