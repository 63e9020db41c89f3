use dashmap::DashMap;

use crate::ident::ServiceId;
use crate::recipe::Recipe;

/// Identifier → recipe table.
#[derive(Default)]
pub struct ServiceRegistry {
    recipes: DashMap<ServiceId, Recipe>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the recipe for `id`. Overwriting does not touch
    /// any instance already cached for `id`.
    pub fn set(&self, id: impl Into<ServiceId>, recipe: Recipe) {
        self.recipes.insert(id.into(), recipe);
    }

    /// True iff a recipe is registered for `id`. A bare class definition does
    /// not count.
    pub fn has(&self, id: &str) -> bool {
        self.recipes.contains_key(id)
    }

    /// Clones the recipe out, so no table guard is held while it is resolved.
    pub fn get(&self, id: &str) -> Option<Recipe> {
        self.recipes.get(id).map(|recipe| recipe.clone())
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_has() {
        let registry = ServiceRegistry::new();
        assert!(!registry.has("svc"));

        registry.set("svc", Recipe::raw(1u8));
        assert!(registry.has("svc"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_set_overwrites_recipe() {
        let registry = ServiceRegistry::new();
        registry.set("svc", Recipe::raw(1u8));
        registry.set("svc", Recipe::type_ref("other"));

        assert!(matches!(registry.get("svc"), Some(Recipe::TypeRef(t)) if t == "other"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let registry = ServiceRegistry::new();
        assert!(registry.get("svc").is_none());
    }
}
