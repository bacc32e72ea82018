//! # App Composition Root
//!
//! One `App` is created per process. It owns the UI execution context and
//! the three registries, all explicitly constructed and explicitly passed
//! (dependency injection), and hands the populated component factory to the
//! driver at start-up.
//!
//! Registration-time errors are fatal by convention: callers abort start-up
//! when a component the application depends on fails to register. Lookup
//! errors are ordinary recoverable failures.

use std::sync::Arc;

use thiserror::Error;
use vitrine_core::{CompoFactory, Component, ConcurrentFactory, Identifier, RegistryError};
use vitrine_dispatch::{
    ActionTable, ConcurrentEventRegistry, EventTable, UiHandle, UiThread, UiThreadBuilder,
};

use crate::driver::Driver;

/// The process-wide component factory, shared between the app, the driver,
/// and any code resolving textual component references.
pub type SharedFactory = Arc<ConcurrentFactory<CompoFactory>>;

/// The process-wide event registry, shared so unrelated parts of the
/// application (menu callbacks, background timers, native OS callbacks on
/// unknown threads) can subscribe and emit without a reference to each other.
pub type SharedEvents = Arc<ConcurrentEventRegistry<EventTable>>;

/// Errors that can occur while assembling and running an app.
#[derive(Error, Debug)]
pub enum AppError {
    /// A component failed to register or resolve.
    #[error("component registry: {0}")]
    Registry(#[from] RegistryError),

    /// The UI execution context's worker thread could not be spawned.
    #[error("ui context failed to start: {0}")]
    UiThread(#[from] std::io::Error),

    /// The driver reported a failure while running the native backend.
    #[error("driver failed: {0}")]
    Driver(String),
}

/// The framework composition root.
pub struct App {
    components: SharedFactory,
    events: SharedEvents,
    actions: ActionTable,
    ui: UiThread,
}

impl App {
    /// Assembles an app with a default UI execution context.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UiThread`] if the worker thread cannot be
    /// spawned.
    pub fn new() -> Result<Self, AppError> {
        Self::with_ui(UiThreadBuilder::new())
    }

    /// Assembles an app, spawning the UI execution context from `builder`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UiThread`] if the worker thread cannot be
    /// spawned.
    pub fn with_ui(builder: UiThreadBuilder) -> Result<Self, AppError> {
        let ui = builder.spawn()?;
        let components: SharedFactory = Arc::new(ConcurrentFactory::new(CompoFactory::new()));
        let events: SharedEvents =
            Arc::new(ConcurrentEventRegistry::new(EventTable::new(ui.handle())));
        let actions = ActionTable::new(Arc::clone(&events));

        Ok(Self {
            components,
            events,
            actions,
            ui,
        })
    }

    /// Registers a component type so it can be created dynamically when its
    /// identifier is found in markup or configuration.
    ///
    /// Call once per component type during process initialization, before
    /// the driver starts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Registry`] when the type cannot yield a stable
    /// identifier; treat this as fatal at start-up.
    pub fn register<T: Component + Default>(&self) -> Result<Identifier, AppError> {
        Ok(self.components.register_type::<T>()?)
    }

    /// Runs the app with the given driver as backend, handing it the
    /// populated component factory.
    ///
    /// # Errors
    ///
    /// Propagates the driver's failure.
    pub fn run<D: Driver>(&self, driver: &mut D) -> Result<(), AppError> {
        tracing::debug!("starting driver");
        driver.run(self.components())
    }

    /// Returns the shared component factory.
    #[must_use]
    pub fn components(&self) -> SharedFactory {
        Arc::clone(&self.components)
    }

    /// Returns the shared event registry.
    #[must_use]
    pub fn events(&self) -> SharedEvents {
        Arc::clone(&self.events)
    }

    /// Returns the action registry.
    #[must_use]
    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    /// Returns a producer handle for the UI execution context.
    #[must_use]
    pub fn ui(&self) -> UiHandle {
        self.ui.handle()
    }

    /// Marshals a state change onto the UI execution context.
    ///
    /// Every UI-affecting mutation must go through here (never inline on the
    /// calling stack, even from the UI thread itself) so that UI-affecting
    /// calls always execute in dispatch order.
    pub fn dispatch<W>(&self, work: W)
    where
        W: FnOnce() + Send + 'static,
    {
        self.ui.dispatch(work);
    }
}
