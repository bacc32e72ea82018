//! # Concurrency Decorator
//!
//! Wraps a [`Factory`] behind a mutual-exclusion boundary so one instance can
//! be shared by arbitrary concurrent callers: registration at start-up, the
//! driver materializing components, reverse lookups from event handlers.
//!
//! The decorator changes no observable behavior of the wrapped factory (same
//! successes, same failures); it only guarantees the descriptor table is
//! never corrupted and a lookup never observes a partially-inserted
//! descriptor. Locks are short-held around table access and are never held
//! across a dispatch to the UI execution context.

use parking_lot::RwLock;

use crate::component::{Component, Identifier};
use crate::error::RegistryResult;
use crate::factory::{describe, ComponentDescriptor, Factory};

/// Thread-safe decorator around any [`Factory`] implementation.
///
/// `register` and `new_component` take the exclusive lock (construction
/// mutates the reverse index); `identifier` takes the shared lock.
///
/// Share it as `Arc<ConcurrentFactory<_>>`; one factory lives per process.
pub struct ConcurrentFactory<F: Factory> {
    inner: RwLock<F>,
}

impl<F: Factory> ConcurrentFactory<F> {
    /// Wraps a factory.
    pub fn new(inner: F) -> Self {
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Registers a prepared descriptor. See [`Factory::register`].
    ///
    /// # Errors
    ///
    /// Propagates the wrapped factory's registration failure unchanged.
    pub fn register(&self, descriptor: ComponentDescriptor) -> RegistryResult<Identifier> {
        self.inner.write().register(descriptor)
    }

    /// Derives the descriptor for `T` and registers it in one step.
    ///
    /// This is the call application code makes once per component type at
    /// process initialization, before the driver starts.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RegistryError::InvalidComponentKind`] when `T` has no
    /// stable identifier; the registry is left unchanged.
    pub fn register_type<T: Component + Default>(&self) -> RegistryResult<Identifier> {
        self.register(describe::<T>()?)
    }

    /// Materializes a fresh instance from a textual reference. See
    /// [`Factory::new_component`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::RegistryError::ComponentNotRegistered`] for an
    /// unknown reference.
    pub fn new_component(&self, reference: &str) -> RegistryResult<(Box<dyn Component>, Identifier)> {
        self.inner.write().new_component(reference)
    }

    /// Reverse lookup by instance identity. See [`Factory::identifier`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::RegistryError::ComponentNotFound`] for instances not
    /// constructed through this factory.
    pub fn identifier(&self, instance: &dyn Component) -> RegistryResult<Identifier> {
        self.inner.read().identifier(instance)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;
    use crate::error::RegistryError;
    use crate::factory::CompoFactory;

    macro_rules! test_compo {
        ($name:ident) => {
            #[derive(Default)]
            struct $name;

            impl Component for $name {
                fn render(&self) -> String {
                    stringify!($name).to_string()
                }
            }
        };
    }

    test_compo!(C0);
    test_compo!(C1);
    test_compo!(C2);
    test_compo!(C3);
    test_compo!(C4);
    test_compo!(C5);
    test_compo!(C6);
    test_compo!(C7);

    #[test]
    fn test_concurrent_registration_loses_no_updates() {
        let factory = Arc::new(ConcurrentFactory::new(CompoFactory::new()));
        let barrier = Arc::new(Barrier::new(8));
        let mut handles = Vec::new();

        macro_rules! spawn_register {
            ($t:ty) => {{
                let factory = Arc::clone(&factory);
                let barrier = Arc::clone(&barrier);
                handles.push(thread::spawn(move || {
                    barrier.wait();
                    factory.register_type::<$t>().unwrap()
                }));
            }};
        }

        spawn_register!(C0);
        spawn_register!(C1);
        spawn_register!(C2);
        spawn_register!(C3);
        spawn_register!(C4);
        spawn_register!(C5);
        spawn_register!(C6);
        spawn_register!(C7);

        for handle in handles {
            handle.join().unwrap();
        }

        // Every registration is retrievable afterward.
        for reference in [
            "tests.c0", "tests.c1", "tests.c2", "tests.c3", "tests.c4", "tests.c5", "tests.c6",
            "tests.c7",
        ] {
            let (instance, identifier) = factory.new_component(reference).unwrap();
            assert_eq!(identifier.as_str(), reference);
            assert_eq!(factory.identifier(instance.as_ref()).unwrap(), identifier);
        }
    }

    #[test]
    fn test_decorator_preserves_failures() {
        let factory = ConcurrentFactory::new(CompoFactory::new());
        let err = factory.new_component("tests.unknown").err().unwrap();
        assert_eq!(
            err,
            RegistryError::ComponentNotRegistered(String::from("tests.unknown"))
        );
    }

    #[test]
    fn test_concurrent_construction_and_lookup() {
        let factory = Arc::new(ConcurrentFactory::new(CompoFactory::new()));
        factory.register_type::<C0>().unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let factory = Arc::clone(&factory);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    let (instance, identifier) = factory.new_component("tests.c0").unwrap();
                    assert_eq!(factory.identifier(instance.as_ref()).unwrap(), identifier);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
