//! # Dispatch Error Types
//!
//! All errors that can occur in event and action dispatch.
//!
//! Subscriber and handler failures during dispatch are isolated per
//! subscriber: they are logged and swallowed so one bad actor never prevents
//! the remaining subscribers from running.

use thiserror::Error;

/// Errors that can occur in event and action dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// `post` was called for an action with no registered handler.
    #[error("action not registered: {0}")]
    ActionNotRegistered(String),

    /// The payload cannot be interpreted as the handler's expected type.
    #[error("invalid payload for action {action}: {reason}")]
    InvalidActionPayload {
        /// Name of the action being posted.
        action: String,
        /// Decode failure description.
        reason: String,
    },

    /// A subscriber reported a failure while handling an event.
    ///
    /// Never surfaced to the emitter; reported through the ambient logger
    /// and swallowed with respect to control flow.
    #[error("subscriber failed for event {event}: {reason}")]
    SubscriberFailed {
        /// Name of the event being dispatched.
        event: String,
        /// Failure description.
        reason: String,
    },
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
