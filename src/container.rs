use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::cache::InstanceCache;
use crate::definition::{ClassDefinition, Dependency, Injectable, ResolvedArgs};
use crate::error::{Result, WireboxError};
use crate::ident::{Identifier, ParameterId, ServiceId};
use crate::parameters::ParameterStore;
use crate::recipe::{Instance, Recipe};
use crate::registry::ServiceRegistry;

/// Dependency-injection container: a service registry, a parameter store and
/// an instance cache wired together by the autowiring resolution engine.
///
/// Recipes, parameters and class definitions are registered during bootstrap;
/// `get` then resolves identifiers on demand, memoizing every instance so the
/// container behaves as a singleton-scoped pool. The container is an
/// explicitly constructed value passed by reference; there is no global
/// registry.
pub struct Container {
    registry: ServiceRegistry,
    parameters: ParameterStore,
    cache: InstanceCache,
    definitions: DashMap<ServiceId, Arc<ClassDefinition>>,
    resolving: Mutex<Vec<ServiceId>>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            registry: ServiceRegistry::new(),
            parameters: ParameterStore::new(),
            cache: InstanceCache::new(),
            definitions: DashMap::new(),
            resolving: Mutex::new(Vec::new()),
        }
    }

    /// Registers or overwrites the recipe for `id`.
    ///
    /// Overwriting an id that already has a cached instance does NOT
    /// invalidate the cache: later `get(id)` calls keep returning the
    /// originally resolved instance.
    pub fn set(&mut self, id: impl Into<ServiceId>, recipe: Recipe) -> &mut Self {
        let id = id.into();
        debug!(id = %id, recipe = ?recipe, "register recipe");
        self.registry.set(id, recipe);
        self
    }

    /// Inserts or overwrites the configuration parameter `name`. The name is
    /// bare, without the `%` delimiter.
    pub fn set_parameter<T: Send + Sync + 'static>(
        &mut self,
        name: impl Into<ParameterId>,
        value: T,
    ) -> &mut Self {
        let name = name.into();
        debug!(name = %name, "set parameter");
        self.parameters.set(name, value);
        self
    }

    /// Registers a constructible type by its wiring descriptor. Definitions
    /// are what makes an identifier resolvable without a recipe.
    pub fn define(&mut self, definition: ClassDefinition) -> &mut Self {
        debug!(id = %definition.id(), "define class");
        self.definitions
            .insert(definition.id().clone(), Arc::new(definition));
        self
    }

    /// Registers a type that declares its own wiring.
    pub fn define_class<T: Injectable>(&mut self) -> &mut Self {
        self.define(T::definition())
    }

    /// True iff a recipe is registered for `id`. Does not consider whether
    /// `id` could still be resolved through a class definition.
    pub fn has(&self, id: &str) -> bool {
        self.registry.has(id)
    }

    /// Number of registered recipes.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Resolves `id` to a shared instance.
    ///
    /// Resolution order: `%name%` parameter tokens, then the instance cache,
    /// then the registered recipe, then the bare class definition. Results of
    /// the recipe and definition paths are memoized under `id`; the parameter
    /// path is never cached.
    pub fn get(&self, id: &str) -> Result<Instance> {
        if let Identifier::Parameter(name) = Identifier::parse(id) {
            return self.parameters.get(name.as_str());
        }

        if let Some(instance) = self.cache.get(id) {
            trace!(id, "cache hit");
            return Ok(instance);
        }

        let _guard = self.enter(id)?;

        let instance = match self.registry.get(id) {
            Some(recipe) => self.resolve_recipe(id, recipe)?,
            None => match self.definition(id) {
                Some(definition) => self.resolve_class(&definition)?,
                None => {
                    return Err(WireboxError::ServiceNotFound { id: id.to_string() });
                }
            },
        };

        // Only fully-built instances reach the cache; first write wins.
        Ok(self.cache.store(ServiceId::new(id), instance))
    }

    /// Resolves `id` and downcasts the result.
    pub fn get_as<T: Send + Sync + 'static>(&self, id: &str) -> Result<Arc<T>> {
        self.get(id)?
            .downcast::<T>()
            .map_err(|_| WireboxError::DowncastFailed {
                id: id.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Looks up the configuration parameter `name` (bare, no delimiter).
    pub fn get_parameter(&self, name: &str) -> Result<Instance> {
        self.parameters.get(name)
    }

    /// Looks up `name` and returns a cloned copy of the scalar value.
    pub fn get_parameter_as<T: Clone + Send + Sync + 'static>(&self, name: &str) -> Result<T> {
        self.get_parameter(name)?
            .downcast::<T>()
            .map(|arc| (*arc).clone())
            .map_err(|_| WireboxError::DowncastFailed {
                id: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    fn definition(&self, id: &str) -> Option<Arc<ClassDefinition>> {
        self.definitions.get(id).map(|entry| entry.clone())
    }

    fn resolve_recipe(&self, id: &str, recipe: Recipe) -> Result<Instance> {
        match recipe {
            Recipe::Prebuilt(instance) => Ok(instance),
            Recipe::Raw(value) => Ok(value),
            Recipe::Factory(factory) => {
                debug!(id, "invoke factory");
                // No lock is held here; the factory may reenter `get`.
                factory(self)
            }
            Recipe::TypeRef(target) => match Identifier::parse(&target) {
                Identifier::Parameter(name) => self.parameters.get(name.as_str()),
                Identifier::Service(service) => match self.definition(service.as_str()) {
                    Some(definition) => self.resolve_class(&definition),
                    None => Ok(Arc::new(target) as Instance),
                },
            },
        }
    }

    /// Builds a new instance from a class definition by satisfying each
    /// declared constructor argument in order.
    fn resolve_class(&self, definition: &ClassDefinition) -> Result<Instance> {
        debug!(class = %definition.id(), "construct");
        let mut args = Vec::with_capacity(definition.dependencies().len());
        for (position, dependency) in definition.dependencies().iter().enumerate() {
            let resolved = match dependency {
                Dependency::Service(id) => self.get(id.as_str())?,
                Dependency::Parameter(name) => {
                    self.parameters.get(name.as_str()).map_err(|err| {
                        debug!(
                            class = %definition.id(),
                            position,
                            parameter = %name,
                            "parameter-bound argument missing"
                        );
                        err
                    })?
                }
                Dependency::Value(value) => value.clone(),
            };
            args.push(resolved);
        }
        definition.construct(ResolvedArgs::new(definition.id().clone(), args))
    }

    /// Pushes `id` onto the resolution-in-progress stack, failing when `id`
    /// is already being resolved further up the call chain.
    fn enter(&self, id: &str) -> Result<ResolveGuard<'_>> {
        let mut stack = self
            .resolving
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if stack.iter().any(|entry| entry.as_str() == id) {
            let mut cycle: Vec<&str> = stack.iter().map(ServiceId::as_str).collect();
            cycle.push(id);
            return Err(WireboxError::CircularDependency {
                cycle: cycle.join(" -> "),
            });
        }
        stack.push(ServiceId::new(id));
        Ok(ResolveGuard {
            stack: &self.resolving,
        })
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("recipes", &self.registry.len())
            .field("definitions", &self.definitions.len())
            .finish_non_exhaustive()
    }
}

/// Pops the resolution stack on scope exit, including error paths.
struct ResolveGuard<'a> {
    stack: &'a Mutex<Vec<ServiceId>>,
}

impl Drop for ResolveGuard<'_> {
    fn drop(&mut self) {
        self.stack
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
    }
}
