//! # Component Capability Trait and Identifiers
//!
//! A component is the unit of UI the framework knows how to materialize from
//! a textual reference. The registry never sees concrete component types at
//! lookup time; it traffics in `Box<dyn Component>` handles produced by
//! registered constructors.
//!
//! Identifiers are derived deterministically from the component's qualified
//! type name, never from a call-site string, so the same type always maps to
//! the same identifier regardless of which part of the program registers or
//! references it.

use std::borrow::Borrow;
use std::fmt;

use crate::error::{RegistryError, RegistryResult};

/// Capability trait for UI components.
///
/// Instances live behind `Box<dyn Component>`: they are addressable (stable
/// heap identity for the reverse index), mutable in place by their owner, and
/// renderable into the markup the native driver consumes.
///
/// Rendering semantics are opaque to the registry; `render` output goes
/// straight to the driver.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Hello {
///     name: String,
/// }
///
/// impl Component for Hello {
///     fn render(&self) -> String {
///         format!("<div>Hello, {}!</div>", self.name)
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// Returns the markup describing the component's current appearance.
    ///
    /// Called by the driver whenever the component must be (re)drawn.
    fn render(&self) -> String;
}

/// Normalized string key uniquely naming a registered component type.
///
/// Shape is `module.type`, all lowercase: a component type `pkg::Foo`
/// yields the identifier `pkg.foo`. This is the form embedded in markup and
/// configuration (e.g. a window's default content URL).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Derives the identifier for a component type.
    ///
    /// Takes the last two path segments of the qualified type name (the
    /// enclosing module leaf and the type name), lowercases them, and joins
    /// them with `.`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidComponentKind`] when the type has no
    /// stable nameable identity: generic instantiations, closures, and any
    /// other type whose name segments contain characters outside
    /// `[A-Za-z0-9_]`.
    pub fn of<T: 'static>() -> RegistryResult<Self> {
        Self::from_qualified(std::any::type_name::<T>())
    }

    /// Normalizes a textual reference for lookup.
    ///
    /// Lookups are case-insensitive: `"pkg.Foo"` and `"pkg.foo"` name the
    /// same component type.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self(raw.to_ascii_lowercase())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_qualified(qualified: &str) -> RegistryResult<Self> {
        let segments: Vec<&str> = qualified.split("::").collect();
        let tail = if segments.len() >= 2 {
            &segments[segments.len() - 2..]
        } else {
            &segments[..]
        };

        if tail.iter().any(|s| !Self::is_stable_segment(s)) {
            return Err(RegistryError::InvalidComponentKind {
                type_name: qualified.to_string(),
            });
        }

        Ok(Self(tail.join(".").to_ascii_lowercase()))
    }

    /// A segment is stable when it is a plain path ident: non-empty, only
    /// ASCII alphanumerics and underscores. Generic arguments (`<`, `>`),
    /// closure markers (`{`, `}`) and the like all fail this.
    fn is_stable_segment(segment: &str) -> bool {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Allows HashMap<Identifier, _> lookups keyed by &str.
impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo;

    impl Component for Foo {
        fn render(&self) -> String {
            String::from("<div>foo</div>")
        }
    }

    struct Wrapped<T>(T);

    impl Component for Wrapped<u8> {
        fn render(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_identifier_is_module_dot_type_lowercase() {
        let ident = Identifier::of::<Foo>().unwrap();
        assert_eq!(ident.as_str(), "tests.foo");
    }

    #[test]
    fn test_identifier_derivation_is_deterministic() {
        assert_eq!(Identifier::of::<Foo>(), Identifier::of::<Foo>());
    }

    #[test]
    fn test_normalize_is_case_insensitive() {
        assert_eq!(
            Identifier::normalize("tests.Foo"),
            Identifier::of::<Foo>().unwrap()
        );
    }

    #[test]
    fn test_generic_instantiation_is_rejected() {
        let err = Identifier::of::<Wrapped<u8>>().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidComponentKind { .. }));
    }

    #[test]
    fn test_display_matches_as_str() {
        let ident = Identifier::of::<Foo>().unwrap();
        assert_eq!(ident.to_string(), ident.as_str());
    }
}
