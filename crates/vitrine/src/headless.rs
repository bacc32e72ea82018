//! # Headless Driver
//!
//! A driver with no native backend: it materializes a root component from a
//! textual reference and records rendered markup as strings. Used by the
//! integration tests and handy for tooling that wants to exercise component
//! wiring without a display server.

use vitrine_core::{Component, Identifier};

use crate::app::{AppError, SharedFactory};
use crate::driver::Driver;

/// Driver that renders to recorded strings instead of native widgets.
pub struct HeadlessDriver {
    root: String,
    mounted: Option<(Box<dyn Component>, Identifier)>,
    frames: Vec<String>,
}

impl HeadlessDriver {
    /// Creates a headless driver that will mount the component named by the
    /// given textual reference as its root content.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            mounted: None,
            frames: Vec::new(),
        }
    }

    /// Returns the identifier of the mounted root component, if any.
    #[must_use]
    pub fn mounted_identifier(&self) -> Option<&Identifier> {
        self.mounted.as_ref().map(|(_, identifier)| identifier)
    }

    /// Renders the mounted root component again, recording a new frame.
    pub fn render_root(&mut self) {
        if let Some((component, _)) = &self.mounted {
            self.frames.push(component.render());
        }
    }

    /// Returns every frame of markup recorded so far.
    #[must_use]
    pub fn frames(&self) -> &[String] {
        &self.frames
    }
}

impl Driver for HeadlessDriver {
    fn run(&mut self, components: SharedFactory) -> Result<(), AppError> {
        let (component, identifier) = components.new_component(&self.root)?;
        tracing::debug!(identifier = %identifier, "headless driver mounted root component");

        self.frames.push(component.render());
        self.mounted = Some((component, identifier));
        Ok(())
    }
}
