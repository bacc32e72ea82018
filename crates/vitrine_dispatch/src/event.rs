//! # Event Registry
//!
//! Publish/subscribe keyed by event name: any number of subscribers per
//! name, notified in subscription order. `emit` may originate from any
//! thread; the dispatch itself is marshaled onto the UI execution context so
//! subscribers never race with concurrent UI mutation.
//!
//! Failure semantics: a failing subscriber is reported to the ambient logger
//! and swallowed. One bad subscriber cannot break dispatch for the others.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DispatchError, DispatchResult};
use crate::ui::UiHandle;

/// Event and action payloads are JSON values; native drivers deliver them as
/// JSON and typed handlers decode them per invocation.
pub type EventPayload = serde_json::Value;

/// A subscriber callback. Runs on the UI execution context.
pub type EventHandler = Arc<dyn Fn(&EventPayload) -> DispatchResult<()> + Send + Sync>;

/// Handle identifying one subscription, for later removal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
    event: String,
}

impl Subscription {
    /// Returns the event name this subscription is attached to.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }
}

/// The event registry contract.
///
/// Implementations are single-threaded; wrap them in
/// [`ConcurrentEventRegistry`] before sharing across callers.
pub trait EventRegistry: Send {
    /// Appends a subscriber to the ordered list for `event`. Never fails;
    /// duplicate names accumulate subscribers rather than replacing.
    fn subscribe(&mut self, event: &str, handler: EventHandler) -> Subscription;

    /// Removes exactly the subscriber registered under `subscription`.
    /// Idempotent: removing an already-removed handle is a no-op.
    fn unsubscribe(&mut self, subscription: &Subscription);

    /// Dispatches `payload` to every current subscriber of `event`.
    ///
    /// Snapshots the subscriber list, then marshals one unit of work onto
    /// the UI context that invokes each snapshotted subscriber in order.
    /// Unsubscribing mid-dispatch does not affect an emit already snapshotted.
    /// Zero subscribers is a silent no-op.
    fn emit(&self, event: &str, payload: EventPayload);
}

/// Table-backed [`EventRegistry`] implementation.
pub struct EventTable {
    subscribers: HashMap<String, Vec<(u64, EventHandler)>>,
    next_id: u64,
    ui: UiHandle,
}

impl EventTable {
    /// Creates an empty registry dispatching through `ui`.
    #[must_use]
    pub fn new(ui: UiHandle) -> Self {
        Self {
            subscribers: HashMap::new(),
            next_id: 0,
            ui,
        }
    }
}

impl EventRegistry for EventTable {
    fn subscribe(&mut self, event: &str, handler: EventHandler) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers
            .entry(event.to_string())
            .or_default()
            .push((id, handler));
        Subscription {
            id,
            event: event.to_string(),
        }
    }

    fn unsubscribe(&mut self, subscription: &Subscription) {
        if let Some(list) = self.subscribers.get_mut(&subscription.event) {
            list.retain(|(id, _)| *id != subscription.id);
            if list.is_empty() {
                self.subscribers.remove(&subscription.event);
            }
        }
    }

    fn emit(&self, event: &str, payload: EventPayload) {
        let Some(list) = self.subscribers.get(event) else {
            return;
        };

        let snapshot: Vec<EventHandler> = list.iter().map(|(_, h)| Arc::clone(h)).collect();
        let event = event.to_string();
        self.ui.dispatch(move || {
            for handler in &snapshot {
                if let Err(err) = handler(&payload) {
                    tracing::error!(event = %event, error = %err, "event subscriber failed");
                }
            }
        });
    }
}

/// Thread-safe decorator around any [`EventRegistry`] implementation.
///
/// Same decorator shape as `vitrine_core`'s `ConcurrentFactory`: subscribe
/// and unsubscribe take the exclusive lock, emit takes the shared lock. The
/// lock is released before any subscriber runs (subscribers execute later on
/// the UI context), so a subscriber may re-enter the registry freely.
pub struct ConcurrentEventRegistry<E: EventRegistry> {
    inner: RwLock<E>,
}

impl<E: EventRegistry> ConcurrentEventRegistry<E> {
    /// Wraps a registry.
    pub fn new(inner: E) -> Self {
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Appends a subscriber. See [`EventRegistry::subscribe`].
    pub fn subscribe(&self, event: &str, handler: EventHandler) -> Subscription {
        self.inner.write().subscribe(event, handler)
    }

    /// Appends a typed subscriber that decodes the JSON payload into `P` on
    /// every invocation. A payload that does not decode counts as that
    /// subscriber failing: it is logged and the remaining subscribers still
    /// run.
    pub fn subscribe_to<P, F>(&self, event: &str, callback: F) -> Subscription
    where
        P: DeserializeOwned + 'static,
        F: Fn(P) + Send + Sync + 'static,
    {
        let event_name = event.to_string();
        let handler: EventHandler = Arc::new(move |payload: &EventPayload| {
            let decoded: P = serde_json::from_value(payload.clone()).map_err(|err| {
                DispatchError::SubscriberFailed {
                    event: event_name.clone(),
                    reason: format!("payload decode: {err}"),
                }
            })?;
            callback(decoded);
            Ok(())
        });
        self.subscribe(event, handler)
    }

    /// Removes a subscriber. See [`EventRegistry::unsubscribe`].
    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.inner.write().unsubscribe(subscription);
    }

    /// Serializes `payload` and dispatches it to every current subscriber of
    /// `event`. Never fails: a payload that cannot be serialized is logged
    /// and the emit becomes a no-op.
    pub fn emit<P: Serialize>(&self, event: &str, payload: P) {
        match serde_json::to_value(payload) {
            Ok(value) => self.inner.read().emit(event, value),
            Err(err) => {
                tracing::error!(event = %event, error = %err, "event payload not serializable");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::test_util::flush;
    use crate::ui::UiThread;

    fn registry(ui: &UiThread) -> Arc<ConcurrentEventRegistry<EventTable>> {
        Arc::new(ConcurrentEventRegistry::new(EventTable::new(ui.handle())))
    }

    #[test]
    fn test_subscribers_run_in_subscription_order_with_payload() {
        let ui = UiThread::spawn().unwrap();
        let events = registry(&ui);
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["a", "b"] {
            let seen = Arc::clone(&seen);
            events.subscribe(
                "ready",
                Arc::new(move |payload: &EventPayload| {
                    seen.lock().push((tag, payload.clone()));
                    Ok(())
                }),
            );
        }

        events.emit("ready", 42);
        flush(&ui.handle());

        let seen = seen.lock();
        assert_eq!(
            *seen,
            vec![
                ("a", EventPayload::from(42)),
                ("b", EventPayload::from(42))
            ]
        );
    }

    #[test]
    fn test_emit_without_subscribers_is_a_no_op() {
        let ui = UiThread::spawn().unwrap();
        let events = registry(&ui);

        events.emit("unused", ());
        flush(&ui.handle());
    }

    #[test]
    fn test_failing_subscriber_does_not_stop_later_ones() {
        let ui = UiThread::spawn().unwrap();
        let events = registry(&ui);
        let seen = Arc::new(Mutex::new(Vec::new()));

        events.subscribe(
            "ready",
            Arc::new(|_| {
                Err(DispatchError::SubscriberFailed {
                    event: String::from("ready"),
                    reason: String::from("simulated"),
                })
            }),
        );
        {
            let seen = Arc::clone(&seen);
            events.subscribe(
                "ready",
                Arc::new(move |_| {
                    seen.lock().push("late");
                    Ok(())
                }),
            );
        }

        events.emit("ready", ());
        flush(&ui.handle());
        assert_eq!(*seen.lock(), vec!["late"]);
    }

    #[test]
    fn test_unsubscribe_is_exact_and_idempotent() {
        let ui = UiThread::spawn().unwrap();
        let events = registry(&ui);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let seen = Arc::clone(&seen);
            events.subscribe(
                "ready",
                Arc::new(move |_| {
                    seen.lock().push("first");
                    Ok(())
                }),
            )
        };
        {
            let seen = Arc::clone(&seen);
            events.subscribe(
                "ready",
                Arc::new(move |_| {
                    seen.lock().push("second");
                    Ok(())
                }),
            );
        }

        events.unsubscribe(&first);
        events.unsubscribe(&first);

        events.emit("ready", ());
        flush(&ui.handle());
        assert_eq!(*seen.lock(), vec!["second"]);
    }

    #[test]
    fn test_unsubscribing_mid_dispatch_keeps_the_snapshot() {
        let ui = UiThread::spawn().unwrap();
        let events = registry(&ui);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        {
            let seen = Arc::clone(&seen);
            let victim = Arc::clone(&victim);
            let registry = Arc::clone(&events);
            events.subscribe(
                "ready",
                Arc::new(move |_| {
                    seen.lock().push("first");
                    if let Some(subscription) = victim.lock().take() {
                        registry.unsubscribe(&subscription);
                    }
                    Ok(())
                }),
            );
        }
        let second = {
            let seen = Arc::clone(&seen);
            events.subscribe(
                "ready",
                Arc::new(move |_| {
                    seen.lock().push("second");
                    Ok(())
                }),
            )
        };
        *victim.lock() = Some(second);

        // The snapshot for this emit still contains the second subscriber.
        events.emit("ready", ());
        flush(&ui.handle());
        assert_eq!(*seen.lock(), vec!["first", "second"]);

        // The next emit no longer does.
        events.emit("ready", ());
        flush(&ui.handle());
        assert_eq!(*seen.lock(), vec!["first", "second", "first"]);
    }

    #[test]
    fn test_typed_subscription_decodes_each_payload() {
        let ui = UiThread::spawn().unwrap();
        let events = registry(&ui);
        let seen = Arc::new(Mutex::new(Vec::new()));

        {
            let seen = Arc::clone(&seen);
            events.subscribe_to::<u32, _>("counter", move |value| {
                seen.lock().push(value);
            });
        }

        events.emit("counter", 7_u32);
        // A payload of the wrong shape is an isolated subscriber failure.
        events.emit("counter", "not a number");
        events.emit("counter", 8_u32);
        flush(&ui.handle());

        assert_eq!(*seen.lock(), vec![7, 8]);
    }
}
