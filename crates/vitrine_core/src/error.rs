//! # Registry Error Types
//!
//! All errors that can occur in the component registry.
//!
//! Registration errors at process start-up are fatal by convention: callers
//! are expected to abort start-up when a component the application depends on
//! fails to register. Lookup errors are ordinary recoverable failures.

use thiserror::Error;

/// Errors that can occur in the component registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registrant cannot yield a stable, addressable identifier.
    ///
    /// Component instances must be independently addressable so that later
    /// in-place mutations are observed through the same identity used for
    /// registration and lookup. Generic instantiations and anonymous types
    /// have no stable qualified name and are rejected.
    #[error("invalid component kind: {type_name} cannot yield a stable identifier")]
    InvalidComponentKind {
        /// Qualified name of the rejected registrant type.
        type_name: String,
    },

    /// No constructor is registered under the requested identifier.
    #[error("component not registered: {0}")]
    ComponentNotRegistered(String),

    /// Reverse lookup miss: the instance was never constructed through
    /// this factory.
    #[error("component not found in reverse index")]
    ComponentNotFound,
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
