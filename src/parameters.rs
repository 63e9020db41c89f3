use dashmap::DashMap;
use std::sync::Arc;

use crate::error::{Result, WireboxError};
use crate::ident::ParameterId;
use crate::recipe::Instance;

/// Flat store of named configuration values.
///
/// Parameters live in a namespace disjoint from services: they are reached
/// through `%name%` tokens or parameter-bound constructor arguments, never
/// through the instance cache.
#[derive(Default)]
pub struct ParameterStore {
    values: DashMap<ParameterId, Instance>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites. Any value type is accepted.
    pub fn set<T: Send + Sync + 'static>(&self, name: impl Into<ParameterId>, value: T) {
        self.values.insert(name.into(), Arc::new(value));
    }

    /// Pure lookup; no resolution recursion.
    pub fn get(&self, name: &str) -> Result<Instance> {
        self.values
            .get(name)
            .map(|value| value.clone())
            .ok_or_else(|| WireboxError::ParameterNotFound {
                name: name.to_string(),
            })
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let store = ParameterStore::new();
        store.set("db_host", "localhost".to_string());

        let value = store.get("db_host").unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "localhost");
    }

    #[test]
    fn test_set_overwrites() {
        let store = ParameterStore::new();
        store.set("retries", 3u32);
        store.set("retries", 5u32);

        let value = store.get("retries").unwrap();
        assert_eq!(*value.downcast_ref::<u32>().unwrap(), 5);
    }

    #[test]
    fn test_missing_parameter() {
        let store = ParameterStore::new();
        let err = store.get("missing").unwrap_err();
        assert!(matches!(err, WireboxError::ParameterNotFound { name } if name == "missing"));
    }

    #[test]
    fn test_has() {
        let store = ParameterStore::new();
        assert!(!store.has("flag"));
        store.set("flag", true);
        assert!(store.has("flag"));
    }
}
