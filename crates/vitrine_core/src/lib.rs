//! # Vitrine Core - Component Registry
//!
//! Name-indexed component construction for the Vitrine UI framework:
//! - Component types register themselves under a stable string identifier
//! - Identifiers are derived from the type, never from a call site, so
//!   markup and configuration can reference a component type without a
//!   compile-time dependency on it
//! - A reverse index recovers the identifier a live instance was built from
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   ConcurrentFactory                      │
//! │              (RwLock around any Factory)                 │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                   CompoFactory                     │  │
//! │  │                                                    │  │
//! │  │  identifier ──> constructor   (descriptor table)   │  │
//! │  │  instance   ──> identifier    (reverse index)      │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//!            ▲                              ▲
//!            │ register::<T>()              │ new_component("pkg.foo")
//!       application code                 driver / markup
//! ```
//!
//! Registration happens once at process start-up; lookups may come from any
//! thread for the process lifetime.

pub mod component;
pub mod concurrent;
pub mod error;
pub mod factory;

pub use component::{Component, Identifier};
pub use concurrent::ConcurrentFactory;
pub use error::{RegistryError, RegistryResult};
pub use factory::{describe, CompoFactory, ComponentDescriptor, Factory};
