use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::container::Container;
use crate::error::Result;

/// A fully-resolved value held by the container. Everything the engine hands
/// out is shared; callers downcast with [`Container::get_as`] or
/// [`crate::ResolvedArgs::get`].
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Factory closure invoked with the container itself, so it can resolve its
/// own dependencies through reentrant `get` calls.
pub type FactoryFn = Arc<dyn Fn(&Container) -> Result<Instance> + Send + Sync>;

/// How a service identifier's value is produced.
#[derive(Clone)]
pub enum Recipe {
    /// Alias to another identifier: a constructible type, a `%name%`
    /// parameter token, or (when it is neither) a literal string value.
    TypeRef(String),
    /// Closure invoked with the container on first resolution.
    Factory(FactoryFn),
    /// An already-built object, returned as-is.
    Prebuilt(Instance),
    /// An arbitrary value, returned verbatim.
    Raw(Instance),
}

impl Recipe {
    pub fn type_ref(target: impl Into<String>) -> Self {
        Recipe::TypeRef(target.into())
    }

    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(&Container) -> Result<Instance> + Send + Sync + 'static,
    {
        Recipe::Factory(Arc::new(f))
    }

    pub fn prebuilt<T: Send + Sync + 'static>(instance: T) -> Self {
        Recipe::Prebuilt(Arc::new(instance))
    }

    pub fn raw<T: Send + Sync + 'static>(value: T) -> Self {
        Recipe::Raw(Arc::new(value))
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipe::TypeRef(target) => f.debug_tuple("TypeRef").field(target).finish(),
            Recipe::Factory(_) => f.write_str("Factory(..)"),
            Recipe::Prebuilt(_) => f.write_str("Prebuilt(..)"),
            Recipe::Raw(_) => f.write_str("Raw(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_pick_the_right_variant() {
        assert!(matches!(Recipe::type_ref("app.db"), Recipe::TypeRef(t) if t == "app.db"));
        assert!(matches!(Recipe::prebuilt(1u8), Recipe::Prebuilt(_)));
        assert!(matches!(Recipe::raw("x"), Recipe::Raw(_)));
        assert!(matches!(
            Recipe::factory(|_| Ok(Arc::new(()) as Instance)),
            Recipe::Factory(_)
        ));
    }

    #[test]
    fn test_debug_never_exposes_closures() {
        let rendered = format!("{:?}", Recipe::factory(|_| Ok(Arc::new(()) as Instance)));
        assert_eq!(rendered, "Factory(..)");
    }
}
