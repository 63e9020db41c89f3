use dashmap::DashMap;

use crate::ident::ServiceId;
use crate::recipe::Instance;

/// Memoization table: one shared instance per identifier for the container's
/// lifetime. There is no invalidation API.
#[derive(Default)]
pub struct InstanceCache {
    instances: DashMap<ServiceId, Instance>,
}

impl InstanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Instance> {
        self.instances.get(id).map(|entry| entry.clone())
    }

    /// Stores `instance` unless an entry already exists, and returns whichever
    /// instance ends up cached. First write wins: reentrant resolution can
    /// never replace an instance that was already handed out.
    pub fn store(&self, id: ServiceId, instance: Instance) -> Instance {
        self.instances.entry(id).or_insert(instance).clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_store_and_get() {
        let cache = InstanceCache::new();
        assert!(cache.get("svc").is_none());

        cache.store(ServiceId::new("svc"), Arc::new(7u32));
        let hit = cache.get("svc").unwrap();
        assert_eq!(*hit.downcast_ref::<u32>().unwrap(), 7);
        assert!(cache.contains("svc"));
    }

    #[test]
    fn test_first_write_wins() {
        let cache = InstanceCache::new();
        let first = cache.store(ServiceId::new("svc"), Arc::new(1u32));
        let second = cache.store(ServiceId::new("svc"), Arc::new(2u32));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second.downcast_ref::<u32>().unwrap(), 1);
    }
}
