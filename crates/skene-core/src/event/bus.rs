// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// A marker trait for value-semantics event payloads.
///
/// Payloads delivered through the [`EventBus`] must be plain data: handlers
/// receive a shared `&E` and the `Clone` bound keeps publishers free to hand
/// the bus an owned copy. A subscriber can therefore never observe in-place
/// mutation performed by another subscriber during the same dispatch.
///
/// # Examples
///
/// ```
/// use skene_core::event::Event;
///
/// #[derive(Clone)]
/// struct StageCleared { stage: u8 }
///
/// impl Event for StageCleared {}
/// ```
pub trait Event: Clone + Send + Sync + 'static {}

/// An opaque token identifying one subscription on an [`EventBus`].
///
/// Returned by [`EventBus::subscribe`] and consumed by
/// [`EventBus::unsubscribe`] to remove exactly that handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Internal type-erased handler entry. The wrapper closure downcasts the
/// payload back to the concrete event type before invoking the user handler,
/// mirroring how loader registries erase their asset type.
struct HandlerEntry {
    id: SubscriptionId,
    handler: Arc<dyn Fn(&dyn Any) + Send + Sync>,
}

#[derive(Default)]
struct BusState {
    next_id: u64,
    handlers: HashMap<TypeId, Vec<HandlerEntry>>,
}

/// A synchronous, type-keyed publish/subscribe hub.
///
/// Handlers for an event type are kept in subscription order and invoked in
/// that order, synchronously, on the publishing call stack. Dispatch runs
/// against a snapshot of the handler list taken when [`publish`](Self::publish)
/// is entered, so a handler may subscribe, unsubscribe, or publish again
/// without deadlocking the bus.
///
/// The bus does not catch handler panics: a panicking subscriber unwinds
/// through `publish` and aborts delivery to later subscribers in that call.
#[derive(Default)]
pub struct EventBus {
    inner: Mutex<BusState>,
}

impl EventBus {
    /// Creates a new, empty event bus.
    pub fn new() -> Self {
        log::debug!("EventBus initialized.");
        Self {
            inner: Mutex::new(BusState::default()),
        }
    }

    // A handler panic during dispatch never happens while the lock is held,
    // but the poison flag can still be set by a panicking test thread; the
    // state itself stays consistent, so recover it.
    fn state(&self) -> MutexGuard<'_, BusState> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Subscribes `handler` to events of type `E`.
    ///
    /// The handler is appended to the ordered list for `E`; the first
    /// subscription for a type creates the list. Returns a token that
    /// removes exactly this handler when passed to
    /// [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<E: Event>(
        &self,
        handler: impl Fn(&E) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let erased: Arc<dyn Fn(&dyn Any) + Send + Sync> = Arc::new(move |payload| {
            if let Some(event) = payload.downcast_ref::<E>() {
                handler(event);
            }
        });

        let mut state = self.state();
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);

        state
            .handlers
            .entry(TypeId::of::<E>())
            .or_default()
            .push(HandlerEntry { id, handler: erased });

        log::trace!("Subscribed handler {id:?} for {}", std::any::type_name::<E>());
        id
    }

    /// Removes the single subscription identified by `id`.
    ///
    /// Returns `true` if a handler was removed, `false` if the token did not
    /// match a live subscription. Other handlers for the same event type are
    /// unaffected.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state();
        for entries in state.handlers.values_mut() {
            if let Some(pos) = entries.iter().position(|entry| entry.id == id) {
                entries.remove(pos);
                log::trace!("Unsubscribed handler {id:?}");
                return true;
            }
        }
        false
    }

    /// Publishes `event` to every currently-subscribed handler for `E`.
    ///
    /// Handlers run synchronously in subscription order before this call
    /// returns; a slow handler therefore delays the publisher. Publishing a
    /// type with zero subscribers is a no-op. There is no persistence: a
    /// payload published before any subscriber exists is lost.
    pub fn publish<E: Event>(&self, event: E) {
        let snapshot: Vec<Arc<dyn Fn(&dyn Any) + Send + Sync>> = {
            let state = self.state();
            match state.handlers.get(&TypeId::of::<E>()) {
                Some(entries) => entries.iter().map(|e| e.handler.clone()).collect(),
                None => return,
            }
        };

        log::trace!(
            "Publishing {} to {} subscriber(s)",
            std::any::type_name::<E>(),
            snapshot.len()
        );

        for handler in snapshot {
            handler(&event);
        }
    }

    /// Returns the number of live subscriptions for events of type `E`.
    #[must_use]
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.state()
            .handlers
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct PoolReady {
        key: &'static str,
        count: usize,
    }

    impl Event for PoolReady {}

    #[derive(Debug, Clone, PartialEq)]
    struct StageEntered {
        stage: u8,
    }

    impl Event for StageEntered {}

    fn ready(count: usize) -> PoolReady {
        PoolReady {
            key: "BasicSoldier",
            count,
        }
    }

    #[test]
    fn handlers_run_once_in_subscription_order() {
        let bus = EventBus::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let calls = calls.clone();
            bus.subscribe(move |_: &PoolReady| {
                calls.lock().unwrap().push(tag);
            });
        }

        bus.publish(ready(10));
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn publish_without_subscribers_is_noop() {
        let bus = EventBus::new();
        // Must not panic or deliver anywhere.
        bus.publish(ready(0));
        assert_eq!(bus.subscriber_count::<PoolReady>(), 0);
    }

    #[test]
    fn handler_receives_payload_by_value_semantics() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(None));

        let seen_clone = seen.clone();
        bus.subscribe(move |event: &PoolReady| {
            *seen_clone.lock().unwrap() = Some(event.clone());
        });

        bus.publish(ready(4));
        assert_eq!(*seen.lock().unwrap(), Some(ready(4)));
    }

    #[test]
    fn unsubscribe_removes_exactly_one_handler() {
        let bus = EventBus::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let calls_a = calls.clone();
        let sub_a = bus.subscribe(move |_: &PoolReady| {
            calls_a.lock().unwrap().push("a");
        });
        let calls_b = calls.clone();
        bus.subscribe(move |_: &PoolReady| {
            calls_b.lock().unwrap().push("b");
        });

        assert!(bus.unsubscribe(sub_a));
        assert_eq!(bus.subscriber_count::<PoolReady>(), 1);

        bus.publish(ready(1));
        assert_eq!(*calls.lock().unwrap(), vec!["b"]);

        // A stale token is rejected.
        assert!(!bus.unsubscribe(sub_a));
    }

    #[test]
    fn dispatch_is_isolated_per_event_type() {
        let bus = EventBus::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let calls_pool = calls.clone();
        bus.subscribe(move |event: &PoolReady| {
            calls_pool.lock().unwrap().push(format!("pool:{}", event.count));
        });
        let calls_stage = calls.clone();
        bus.subscribe(move |event: &StageEntered| {
            calls_stage.lock().unwrap().push(format!("stage:{}", event.stage));
        });

        bus.publish(StageEntered { stage: 1 });
        assert_eq!(*calls.lock().unwrap(), vec!["stage:1".to_string()]);
    }

    #[test]
    fn handler_may_resubscribe_during_dispatch() {
        let bus = Arc::new(EventBus::new());
        let calls = Arc::new(Mutex::new(0usize));

        let bus_inner = bus.clone();
        let calls_inner = calls.clone();
        bus.subscribe(move |_: &PoolReady| {
            *calls_inner.lock().unwrap() += 1;
            let calls_nested = calls_inner.clone();
            // Reentrant use of the bus must not deadlock; the new handler
            // only sees later publishes (dispatch runs on a snapshot).
            bus_inner.subscribe(move |_: &PoolReady| {
                *calls_nested.lock().unwrap() += 1;
            });
        });

        bus.publish(ready(1));
        assert_eq!(*calls.lock().unwrap(), 1);

        bus.publish(ready(1));
        assert_eq!(*calls.lock().unwrap(), 3);
    }
}
