//! In-memory renderer for server-side rendering.

use tracing::debug;

use super::{Environment, Renderer};
use crate::error::RenderError;
use crate::registry::{Registry, RegistryOptions};

/// Accumulates merged registries into one registry of its own.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    registry: Registry,
    environment: Environment,
}

impl MemoryRenderer {
    /// Create a renderer for the given environment.
    pub fn new(environment: Environment) -> Self {
        Self::with_options(environment, RegistryOptions::default())
    }

    /// Create a renderer whose accumulated registry uses `options`.
    pub fn with_options(environment: Environment, options: RegistryOptions) -> Self {
        Self {
            registry: Registry::with_options(options),
            environment,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The accumulated registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access, e.g. to register global CSS directly.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// CSS accumulated so far. Leaves the renderer untouched.
    pub fn peek(&self) -> String {
        self.registry.get_styles()
    }

    /// CSS accumulated so far, then start over with an empty registry.
    ///
    /// Server only: in the browser the renderer outlives any one render, and
    /// clearing it would drop styles that mounted components still use.
    pub fn rewind(&mut self) -> Result<String, RenderError> {
        if self.environment == Environment::Browser {
            return Err(RenderError::RewindInBrowser);
        }
        let options = *self.registry.options();
        let previous = std::mem::replace(&mut self.registry, Registry::with_options(options));
        debug!(nodes = previous.len(), "renderer rewound");
        Ok(previous.get_styles())
    }
}

impl Renderer for MemoryRenderer {
    fn merge(&mut self, registry: &Registry) {
        self.registry.merge(registry);
    }

    fn unmerge(&mut self, registry: &Registry) {
        self.registry.unmerge(registry);
    }

    fn to_css(&self) -> String {
        self.peek()
    }
}
