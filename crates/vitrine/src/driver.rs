//! # Driver Seam
//!
//! The driver is the native backend: the sole caller that turns component
//! identifiers into live, on-screen native objects. Platform bindings are
//! out of scope for this crate; only the contract lives here.

use crate::app::{AppError, SharedFactory};

/// A native backend.
///
/// The app hands the driver the populated component factory at start-up;
/// whenever the driver needs to materialize a component from a textual
/// reference (e.g. a window's default content URL), it calls
/// `new_component` on that factory. State changes the driver wants reflected
/// in the UI go through the app's UI execution context.
pub trait Driver {
    /// Starts the backend and blocks until it finishes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Driver`] (or a registry error) when the backend
    /// cannot start or a referenced component cannot be materialized.
    fn run(&mut self, components: SharedFactory) -> Result<(), AppError>;
}
