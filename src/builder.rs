use crate::container::Container;
use crate::definition::{ClassDefinition, Injectable};
use crate::ident::{ParameterId, ServiceId};
use crate::recipe::Recipe;

/// Fluent bootstrap API for assembling a [`Container`].
///
/// # Example
/// ```
/// use wirebox::{ContainerBuilder, Recipe};
///
/// let container = ContainerBuilder::new()
///     .parameter("db_host", "localhost".to_string())
///     .set("app.debug", Recipe::raw(true))
///     .build();
///
/// assert!(container.has("app.debug"));
/// ```
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            container: Container::new(),
        }
    }

    /// Registers a recipe for `id`.
    pub fn set(mut self, id: impl Into<ServiceId>, recipe: Recipe) -> Self {
        self.container.set(id, recipe);
        self
    }

    /// Sets a configuration parameter.
    pub fn parameter<T: Send + Sync + 'static>(
        mut self,
        name: impl Into<ParameterId>,
        value: T,
    ) -> Self {
        self.container.set_parameter(name, value);
        self
    }

    /// Registers a constructible type by its wiring descriptor.
    pub fn define(mut self, definition: ClassDefinition) -> Self {
        self.container.define(definition);
        self
    }

    /// Registers a type that declares its own wiring.
    pub fn define_class<T: Injectable>(mut self) -> Self {
        self.container.define_class::<T>();
        self
    }

    /// Builds the container.
    pub fn build(self) -> Container {
        self.container
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
