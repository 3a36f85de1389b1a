//! In-memory entity store backing the `store.*` host imports

use std::collections::{BTreeMap, HashMap};

use graphshrew_support::entity::Entity;

/// Entities keyed by entity type, then by id.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: HashMap<String, BTreeMap<String, Entity>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity_type: &str, id: &str) -> Option<Entity> {
        self.entities.get(entity_type)?.get(id).cloned()
    }

    /// Replace the entity stored under `(entity_type, id)`.
    pub fn set(&mut self, entity_type: &str, id: &str, entity: Entity) {
        self.entities
            .entry(entity_type.to_string())
            .or_default()
            .insert(id.to_string(), entity);
    }

    pub fn remove(&mut self, entity_type: &str, id: &str) -> Option<Entity> {
        let entities = self.entities.get_mut(entity_type)?;
        let removed = entities.remove(id);
        if entities.is_empty() {
            self.entities.remove(entity_type);
        }
        removed
    }

    /// Ids of all stored entities of `entity_type`, in order.
    pub fn ids(&self, entity_type: &str) -> Vec<String> {
        self.entities
            .get(entity_type)
            .map(|entities| entities.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, entity_type: &str) -> usize {
        self.entities.get(entity_type).map_or(0, BTreeMap::len)
    }

    pub fn len(&self) -> usize {
        self.entities.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}
