//! # Component Factory
//!
//! The descriptor table: maps normalized identifiers to constructors, and
//! live instances back to the identifier they were constructed from.
//!
//! The factory is the only path by which a component becomes a live instance
//! from a textual reference (a URL-like string embedded in a window, page, or
//! menu configuration). One factory is created per process, populated at
//! start-up, and handed to the driver; the API stays safely callable for the
//! process lifetime.

use std::collections::HashMap;

use crate::component::{Component, Identifier};
use crate::error::{RegistryError, RegistryResult};

/// Constructor producing a fresh, default-valued instance of a component
/// type.
pub type Constructor = Box<dyn Fn() -> Box<dyn Component> + Send + Sync>;

/// A registered component type: its normalized identifier paired with the
/// constructor that materializes it.
pub struct ComponentDescriptor {
    identifier: Identifier,
    construct: Constructor,
}

impl ComponentDescriptor {
    /// Returns the normalized identifier this descriptor registers under.
    #[must_use]
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn construct(&self) -> Box<dyn Component> {
        (self.construct)()
    }
}

/// Builds the descriptor for a component type.
///
/// The identifier is derived from the type itself (see [`Identifier::of`]),
/// so the same type always produces the same descriptor no matter where in
/// the program it is described.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidComponentKind`] when the type cannot
/// yield a stable identifier; nothing is registered in that case.
pub fn describe<T: Component + Default>() -> RegistryResult<ComponentDescriptor> {
    let identifier = Identifier::of::<T>()?;
    let construct: Constructor = Box::new(|| {
        Box::new(InstanceCell {
            inner: T::default(),
            _occupied: 0,
        }) as Box<dyn Component>
    });
    Ok(ComponentDescriptor {
        identifier,
        construct,
    })
}

/// Carrier every constructed instance is boxed in. Never zero-sized, so each
/// construction owns a distinct heap allocation and the reverse-index address
/// stays unique among live instances even for stateless component types.
struct InstanceCell<T: Component> {
    inner: T,
    _occupied: u8,
}

impl<T: Component> Component for InstanceCell<T> {
    fn render(&self) -> String {
        self.inner.render()
    }
}

/// The component factory contract.
///
/// Implementations are single-threaded; wrap them in
/// [`crate::ConcurrentFactory`] before sharing across callers.
pub trait Factory: Send {
    /// Stores a descriptor and returns its normalized identifier.
    ///
    /// Re-registering an identifier is last-registration-wins: the previous
    /// constructor is replaced and the overwrite is logged. This keeps
    /// repeated start-up sequences idempotent.
    ///
    /// # Errors
    ///
    /// Implementations may reject descriptors they cannot store; the
    /// table-backed [`CompoFactory`] never does.
    fn register(&mut self, descriptor: ComponentDescriptor) -> RegistryResult<Identifier>;

    /// Materializes a fresh instance from a textual reference.
    ///
    /// The reference is normalized before lookup, so it is case-insensitive.
    /// On success the new instance is recorded in the reverse index and
    /// returned together with its normalized identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ComponentNotRegistered`] for an unknown
    /// reference, with zero side effects.
    fn new_component(&mut self, reference: &str) -> RegistryResult<(Box<dyn Component>, Identifier)>;

    /// Reverse lookup: recovers the identifier a live instance was
    /// constructed from.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ComponentNotFound`] for instances that were
    /// never constructed through this factory.
    fn identifier(&self, instance: &dyn Component) -> RegistryResult<Identifier>;
}

/// Table-backed [`Factory`] implementation.
///
/// The reverse index keys on the heap address of the boxed instance and is
/// never pruned: growth is bounded only by how many components are ever
/// constructed. Long-lived processes churning through many short-lived
/// components will accumulate stale entries; identity is therefore only
/// meaningful for instances that are still alive.
pub struct CompoFactory {
    descriptors: HashMap<Identifier, ComponentDescriptor>,
    instances: HashMap<usize, Identifier>,
}

impl CompoFactory {
    /// Creates an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
            instances: HashMap::new(),
        }
    }
}

impl Default for CompoFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl Factory for CompoFactory {
    fn register(&mut self, descriptor: ComponentDescriptor) -> RegistryResult<Identifier> {
        let identifier = descriptor.identifier().clone();
        if self
            .descriptors
            .insert(identifier.clone(), descriptor)
            .is_some()
        {
            tracing::warn!(identifier = %identifier, "component re-registered, constructor replaced");
        } else {
            tracing::debug!(identifier = %identifier, "component registered");
        }
        Ok(identifier)
    }

    fn new_component(&mut self, reference: &str) -> RegistryResult<(Box<dyn Component>, Identifier)> {
        let wanted = Identifier::normalize(reference);
        let descriptor = self
            .descriptors
            .get(wanted.as_str())
            .ok_or_else(|| RegistryError::ComponentNotRegistered(reference.to_string()))?;

        let instance = descriptor.construct();
        self.instances.insert(instance_key(instance.as_ref()), wanted.clone());
        Ok((instance, wanted))
    }

    fn identifier(&self, instance: &dyn Component) -> RegistryResult<Identifier> {
        self.instances
            .get(&instance_key(instance))
            .cloned()
            .ok_or(RegistryError::ComponentNotFound)
    }
}

/// Instance identity: the address of the component's heap allocation. Stable
/// across moves of the owning `Box`, unique among live instances.
fn instance_key(instance: &dyn Component) -> usize {
    let thin = instance as *const dyn Component as *const ();
    thin as usize
}
