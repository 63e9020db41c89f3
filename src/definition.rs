use std::fmt;
use std::sync::Arc;

use crate::error::{Result, WireboxError};
use crate::ident::{ParameterId, ServiceId};
use crate::recipe::Instance;

/// One constructor argument of a constructible type.
///
/// Rust has no runtime constructor reflection, so each constructible type
/// declares its argument list explicitly and the engine walks this descriptor
/// instead of inspecting live type metadata.
#[derive(Clone)]
pub enum Dependency {
    /// Resolved recursively through the container.
    Service(ServiceId),
    /// Looked up in the parameter store. An explicit parameter binding never
    /// falls back to a default.
    Parameter(ParameterId),
    /// A declared default, used verbatim.
    Value(Instance),
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Service(id) => f.debug_tuple("Service").field(id).finish(),
            Dependency::Parameter(name) => f.debug_tuple("Parameter").field(name).finish(),
            Dependency::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// Positional constructor arguments, resolved in declaration order.
pub struct ResolvedArgs {
    class: ServiceId,
    args: Vec<Instance>,
}

impl ResolvedArgs {
    pub(crate) fn new(class: ServiceId, args: Vec<Instance>) -> Self {
        Self { class, args }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Shared handle to the argument at `index`.
    pub fn get<T: Send + Sync + 'static>(&self, index: usize) -> Result<Arc<T>> {
        let arg = self.args.get(index).cloned().ok_or_else(|| {
            WireboxError::DowncastFailed {
                id: format!("{} argument {index} (out of range)", self.class),
                expected: std::any::type_name::<T>(),
            }
        })?;
        arg.downcast::<T>().map_err(|_| WireboxError::DowncastFailed {
            id: format!("{} argument {index}", self.class),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Cloned copy of the argument at `index`, for scalar values.
    pub fn value<T: Clone + Send + Sync + 'static>(&self, index: usize) -> Result<T> {
        self.get::<T>(index).map(|arc| (*arc).clone())
    }
}

type ConstructorFn = Arc<dyn Fn(ResolvedArgs) -> Result<Instance> + Send + Sync>;

/// Wiring descriptor for a constructible type: the ordered dependency list of
/// its constructor plus the closure that assembles an instance from the
/// resolved arguments.
///
/// # Example
/// ```
/// use wirebox::ClassDefinition;
///
/// struct HttpClient {
///     base_url: String,
///     timeout: u64,
/// }
///
/// let definition = ClassDefinition::builder("app.http_client")
///     .parameter("base_url")
///     .default_value(30u64)
///     .constructor(|args| {
///         Ok(HttpClient {
///             base_url: args.value(0)?,
///             timeout: args.value(1)?,
///         })
///     });
/// assert_eq!(definition.id().as_str(), "app.http_client");
/// ```
#[derive(Clone)]
pub struct ClassDefinition {
    id: ServiceId,
    dependencies: Vec<Dependency>,
    constructor: ConstructorFn,
}

impl ClassDefinition {
    pub fn builder(id: impl Into<ServiceId>) -> DefinitionBuilder {
        DefinitionBuilder {
            id: id.into(),
            dependencies: Vec::new(),
        }
    }

    pub fn id(&self) -> &ServiceId {
        &self.id
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub(crate) fn construct(&self, args: ResolvedArgs) -> Result<Instance> {
        (self.constructor)(args)
    }
}

impl fmt::Debug for ClassDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDefinition")
            .field("id", &self.id)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Fluent builder for a [`ClassDefinition`]. Arguments are declared in
/// constructor order; [`DefinitionBuilder::constructor`] is the terminal.
pub struct DefinitionBuilder {
    id: ServiceId,
    dependencies: Vec<Dependency>,
}

impl DefinitionBuilder {
    /// Declares an argument resolved recursively by service identifier.
    pub fn depends_on(mut self, id: impl Into<ServiceId>) -> Self {
        self.dependencies.push(Dependency::Service(id.into()));
        self
    }

    /// Declares an argument bound to a configuration parameter.
    pub fn parameter(mut self, name: impl Into<ParameterId>) -> Self {
        self.dependencies.push(Dependency::Parameter(name.into()));
        self
    }

    /// Declares an argument with a default value, used verbatim.
    pub fn default_value<T: Send + Sync + 'static>(mut self, value: T) -> Self {
        self.dependencies.push(Dependency::Value(Arc::new(value)));
        self
    }

    /// Attaches the construction closure. The closure receives the resolved
    /// arguments positionally and returns the bare instance; the container
    /// wraps it for sharing.
    pub fn constructor<T, F>(self, f: F) -> ClassDefinition
    where
        T: Send + Sync + 'static,
        F: Fn(ResolvedArgs) -> Result<T> + Send + Sync + 'static,
    {
        ClassDefinition {
            id: self.id,
            dependencies: self.dependencies,
            constructor: Arc::new(move |args| Ok(Arc::new(f(args)?) as Instance)),
        }
    }
}

/// Types that declare their own wiring, so they can be registered with
/// [`crate::Container::define_class`] instead of an ad-hoc builder call.
pub trait Injectable: Send + Sync + 'static {
    fn definition() -> ClassDefinition;
}
