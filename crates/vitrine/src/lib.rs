//! # VITRINE
//!
//! The core of a cross-platform native-UI application framework: programs
//! describe windows, menus, dock tiles, and status items as data referencing
//! components by identifier; a platform driver turns those references into
//! live native objects.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                              APP                                    │
//! │                       (composition root)                            │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  ┌──────────────────┐    ┌──────────────────┐    ┌───────────────┐  │
//! │  │ ConcurrentFactory│    │ Event / Action   │    │  UI Execution │  │
//! │  │                  │    │ Registries       │───>│  Context      │  │
//! │  │  "pkg.foo" ──>   │    │                  │    │               │  │
//! │  │   constructor    │    │  name ──> subs   │    │  work queue + │  │
//! │  └────────┬─────────┘    └──────────────────┘    │  worker thread│  │
//! │           │                                      └───────▲───────┘  │
//! │           │ new_component("pkg.foo")                     │ dispatch │
//! │  ┌────────┴─────────────────────────────────────────────┴───────┐  │
//! │  │                          DRIVER                              │  │
//! │  │         (native backend - out of scope, seam only)           │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Application code registers component types at process start-up, then runs
//! a driver with the populated registry. Everything that mutates rendered UI
//! state funnels through the UI execution context; events and actions flow
//! through their registries under the same serialization discipline.
//!
//! ## Modules
//!
//! - `app`: the composition root wiring all subsystems
//! - `driver`: the native-backend seam
//! - `headless`: the in-tree driver used for tests and tooling

pub mod app;
pub mod driver;
pub mod headless;

pub use app::{App, AppError, SharedEvents, SharedFactory};
pub use driver::Driver;
pub use headless::HeadlessDriver;

// Re-export the subsystem crates.
pub use vitrine_core as core;
pub use vitrine_dispatch as dispatch;

// Re-export commonly used types.
pub use vitrine_core::{CompoFactory, Component, ConcurrentFactory, Identifier, RegistryError};
pub use vitrine_dispatch::{
    ActionTable, ConcurrentEventRegistry, DispatchError, EventPayload, EventTable, Subscription,
    UiHandle, UiThread, UiThreadBuilder,
};
