//! # Action Registry
//!
//! Actions let loosely-coupled parts of the application (a menu item and the
//! component that should react to it) communicate by name instead of by
//! direct reference. Unlike events, an action name owns exactly one handler:
//! registering again replaces the previous handler.
//!
//! The table rides on the event registry's dispatch plumbing: each handler
//! is a subscriber under a reserved, prefixed event name, so handlers run on
//! the UI execution context and observe a freshly decoded payload per
//! invocation. `post` validates the payload eagerly, before any dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DispatchError, DispatchResult};
use crate::event::{
    ConcurrentEventRegistry, EventHandler, EventPayload, EventRegistry, EventTable, Subscription,
};

/// Reserved event-name prefix keeping actions out of the ordinary event
/// namespace. Implementation detail, never part of the public API.
const ACTION_PREFIX: &str = "action.";

/// Decode-validates a payload against the handler's expected type without
/// invoking the handler.
type PayloadProbe = Arc<dyn Fn(&EventPayload) -> DispatchResult<()> + Send + Sync>;

struct ActionSlot {
    subscription: Subscription,
    probe: PayloadProbe,
}

/// Single-handler-per-name action registry over a shared event registry.
pub struct ActionTable<E: EventRegistry = EventTable> {
    events: Arc<ConcurrentEventRegistry<E>>,
    handlers: Mutex<HashMap<String, ActionSlot>>,
}

impl<E: EventRegistry> ActionTable<E> {
    /// Creates an action table dispatching through the given event registry.
    pub fn new(events: Arc<ConcurrentEventRegistry<E>>) -> Self {
        Self {
            events,
            handlers: Mutex::new(HashMap::new()),
        }
    }

    /// Stores `handler` for `action`, replacing any previous handler.
    ///
    /// The handler runs on the UI execution context and decodes the posted
    /// payload into `P` freshly on every invocation.
    pub fn register<P, F>(&self, action: &str, handler: F)
    where
        P: DeserializeOwned + 'static,
        F: Fn(P) + Send + Sync + 'static,
    {
        let probe: PayloadProbe = {
            let action = action.to_string();
            Arc::new(move |payload: &EventPayload| decode::<P>(&action, payload).map(|_| ()))
        };

        let invoke: EventHandler = {
            let action = action.to_string();
            Arc::new(move |payload: &EventPayload| {
                let decoded = decode::<P>(&action, payload)?;
                handler(decoded);
                Ok(())
            })
        };

        // Replace atomically with respect to `post`: the handlers lock is
        // held across both registry mutations.
        let mut handlers = self.handlers.lock();
        let subscription = self.events.subscribe(&event_name(action), invoke);
        if let Some(previous) = handlers.insert(action.to_string(), ActionSlot { subscription, probe })
        {
            self.events.unsubscribe(&previous.subscription);
            tracing::debug!(action = %action, "action handler replaced");
        } else {
            tracing::debug!(action = %action, "action handler registered");
        }
    }

    /// Posts a payload to the handler registered for `action`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ActionNotRegistered`] when no handler exists
    /// for the name, and [`DispatchError::InvalidActionPayload`] when the
    /// payload cannot be interpreted as the handler's expected type. In both
    /// cases nothing is dispatched.
    pub fn post<P: Serialize>(&self, action: &str, payload: P) -> DispatchResult<()> {
        let value =
            serde_json::to_value(payload).map_err(|err| DispatchError::InvalidActionPayload {
                action: action.to_string(),
                reason: err.to_string(),
            })?;

        let handlers = self.handlers.lock();
        let slot = handlers
            .get(action)
            .ok_or_else(|| DispatchError::ActionNotRegistered(action.to_string()))?;

        (slot.probe)(&value)?;
        self.events.emit(&event_name(action), value);
        Ok(())
    }
}

fn event_name(action: &str) -> String {
    format!("{ACTION_PREFIX}{action}")
}

fn decode<P: DeserializeOwned>(action: &str, payload: &EventPayload) -> DispatchResult<P> {
    serde_json::from_value(payload.clone()).map_err(|err| DispatchError::InvalidActionPayload {
        action: action.to_string(),
        reason: err.to_string(),
    })
}
