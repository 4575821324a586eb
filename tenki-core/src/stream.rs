//! Observable streams with and without replay
//!
//! Two distinct primitives, not one:
//!
//! - [`StateStream`] holds a current value and replays it to late
//!   subscribers. Use it for state facets ("is loading", "latest data").
//! - [`EventStream`] retains nothing; only live subscribers observe an
//!   emission. Use it for discrete one-shot events ("fetch failed").
//!
//! Keeping them separate preserves the semantics distinction that matters for
//! screens: re-subscribing to state re-delivers the latest value, while a
//! stale error from a previous fetch can never re-fire.
//!
//! Within one stream, subscribers observe emissions in publish order.
//! Callbacks run under the stream lock and must not subscribe to or drop a
//! subscription of the same stream. In practice callbacks only post a message
//! through a [`UiHandle`].

use std::sync::Arc;

use parking_lot::Mutex;

use crate::subscription::Subscription;
use crate::ui::UiHandle;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Subscriber registry shared by both stream flavors.
struct Registry<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

impl<T> Registry<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    fn add(&mut self, callback: Callback<T>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    fn notify(&self, value: &T) {
        for (_, callback) in &self.entries {
            callback(value);
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

struct StateInner<T> {
    current: T,
    registry: Registry<T>,
}

/// A push-based observable that retains its most recent value.
///
/// Every new subscriber is immediately delivered the current value, then
/// every later emission. Cloning the stream clones the handle, not the
/// state; all clones publish to and observe the same value.
pub struct StateStream<T> {
    inner: Arc<Mutex<StateInner<T>>>,
}

impl<T> Clone for StateStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> StateStream<T> {
    /// Create a stream seeded with an initial current value.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StateInner {
                current: initial,
                registry: Registry::new(),
            })),
        }
    }

    /// Replace the current value and notify all subscribers, in order.
    ///
    /// May be called from any thread.
    pub fn publish(&self, value: T) {
        let mut inner = self.inner.lock();
        inner.current = value;
        let inner = &*inner;
        inner.registry.notify(&inner.current);
    }

    /// Clone of the current value.
    pub fn value(&self) -> T {
        self.inner.lock().current.clone()
    }

    /// Subscribe to the stream.
    ///
    /// The callback is invoked with the current value before this returns
    /// (replay-latest), then once per subsequent [`publish`](Self::publish).
    /// Dropping the returned [`Subscription`] removes the subscriber; the
    /// callback never runs after that.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let callback: Callback<T> = Arc::new(callback);
        let id = {
            let mut inner = self.inner.lock();
            let id = inner.registry.add(Arc::clone(&callback));
            callback(&inner.current);
            id
        };
        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.lock().registry.remove(id);
            }
        })
    }

    /// Subscribe, redirecting every emission onto the UI loop.
    ///
    /// The projection runs on the emitting thread; the resulting message is
    /// posted through the handle and applied by the UI loop. All screen
    /// subscriptions go through here so render state is only ever touched
    /// from one context.
    pub fn observe_on<M: Send + 'static>(
        &self,
        ui: &UiHandle<M>,
        project: impl Fn(&T) -> M + Send + Sync + 'static,
    ) -> Subscription {
        let ui = ui.clone();
        self.subscribe(move |value| ui.post(project(value)))
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().registry.len()
    }
}

/// A fire-and-forget multicast emitter.
///
/// No value is retained: subscribing delivers nothing until the next
/// [`emit`](Self::emit), and an emission that happened before a subscriber
/// attached is never observed by it.
pub struct EventStream<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T: Send + 'static> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> EventStream<T> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry::new())),
        }
    }

    /// Deliver an event to the currently live subscribers, in order.
    pub fn emit(&self, value: T) {
        self.registry.lock().notify(&value);
    }

    /// Subscribe to future emissions. Nothing is replayed.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.registry.lock().add(Arc::new(callback));
        let weak = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                registry.lock().remove(id);
            }
        })
    }

    /// Subscribe, redirecting every emission onto the UI loop.
    pub fn observe_on<M: Send + 'static>(
        &self,
        ui: &UiHandle<M>,
        project: impl Fn(&T) -> M + Send + Sync + 'static,
    ) -> Subscription {
        let ui = ui.clone();
        self.subscribe(move |value| ui.post(project(value)))
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().len()
    }
}
