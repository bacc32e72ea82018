//! # Vitrine Dispatch - UI Execution Context and Event Plumbing
//!
//! Everything that must not race with rendered UI state funnels through one
//! logical serialization point, "the UI thread":
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                      UI EXECUTION CONTEXT                     │
//! ├───────────────────────────────────────────────────────────────┤
//! │ producers (any thread)          single consumer               │
//! │                                                               │
//! │  app code ──┐                                                 │
//! │  driver ────┼──> unbounded queue ──> worker thread ──> work() │
//! │  timers ────┤     (non-blocking                               │
//! │  emit/post ─┘      enqueue)                                   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The event and action registries ride on top: `emit` and `post` may be
//! called from any thread, but every subscriber and handler runs on the UI
//! context, in a single total order.
//!
//! ## Modules
//!
//! - `ui`: the work queue and its producer handle
//! - `event`: ordered multi-subscriber registry with failure isolation
//! - `action`: single-handler-per-name commands with typed JSON payloads

pub mod action;
pub mod error;
pub mod event;
pub mod ui;

#[cfg(test)]
mod test_util;

pub use action::ActionTable;
pub use error::{DispatchError, DispatchResult};
pub use event::{
    ConcurrentEventRegistry, EventHandler, EventPayload, EventRegistry, EventTable, Subscription,
};
pub use ui::{UiHandle, UiThread, UiThreadBuilder};
