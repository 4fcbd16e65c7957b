use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use legends_core::EntityId;
use tracing::{debug, trace, warn};

use crate::component_collection::ComponentCollection;
use crate::config::{MissingParentPolicy, RegistryConfig};
use crate::entity::Entity;
use crate::error::{EcsError, Result};

/// The entity registry. Owns every entity, keyed by id.
///
/// Invariants:
/// - every non-root parent recorded by a stored entity is itself stored;
/// - the parent/child graph is a forest;
/// - a parent's child set and each child's recorded parent always agree.
///
/// Hierarchy linkage is only ever written here. Callers get mutable access to
/// component data, never to an [`Entity`].
#[derive(Debug, Clone, Default)]
pub struct EntityCollection {
    entities: HashMap<EntityId, Entity>,
    config: RegistryConfig,
}

impl EntityCollection {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            entities: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ---- State ----

    /// Number of stored entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity. No cascade bookkeeping is needed since nothing survives.
    pub fn clear(&mut self) {
        debug!("Clearing {} entities", self.entities.len());
        self.entities.clear();
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    // ---- Insertion ----

    /// Store `components` as a new entity under `parent`.
    ///
    /// A root `parent` makes a top-level entity. An unknown non-root parent is
    /// handled according to [`RegistryConfig::missing_parent`]. The returned
    /// flag reports whether the entity was stored.
    pub fn insert(&mut self, components: ComponentCollection, parent: EntityId) -> (EntityId, bool) {
        let id = EntityId::new();
        let Some(parent) = self.resolve_parent(parent) else {
            return (id, false);
        };

        match self.entities.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(Entity::with_parent(components, parent));
            }
            Entry::Occupied(_) => return (id, false),
        }
        if let Some(parent_entity) = self.entities.get_mut(&parent) {
            parent_entity.remember_child(id);
        }

        debug!("Inserted entity {id} under {parent}");
        (id, true)
    }

    /// Store `components` as a new top-level entity.
    pub fn insert_root(&mut self, components: ComponentCollection) -> EntityId {
        self.insert(components, EntityId::root()).0
    }

    /// Move every entity of `other` into this registry under fresh ids.
    /// Top-level entities of `other` are attached to `parent`; the rest keep
    /// their hierarchy, rewritten to the new ids.
    ///
    /// Returns the old-to-new id map, or `None` without moving anything if
    /// `parent` is rejected.
    pub fn insert_range(
        &mut self,
        other: EntityCollection,
        parent: EntityId,
    ) -> Option<HashMap<EntityId, EntityId>> {
        let parent = self.resolve_parent(parent)?;
        let remap: HashMap<EntityId, EntityId> = other
            .entities
            .keys()
            .map(|old| (*old, EntityId::new()))
            .collect();

        for (old, entity) in other.entities {
            let Some(&id) = remap.get(&old) else {
                continue;
            };
            let new_parent = remap.get(&entity.parent()).copied().unwrap_or(parent);
            let children: Vec<EntityId> = entity
                .children()
                .filter_map(|child| remap.get(&child).copied())
                .collect();

            let mut moved = Entity::with_parent(entity.into_components(), new_parent);
            for child in children {
                moved.remember_child(child);
            }
            self.entities.insert(id, moved);

            if new_parent == parent {
                if let Some(parent_entity) = self.entities.get_mut(&parent) {
                    parent_entity.remember_child(id);
                }
            }
        }

        debug!("Merged {} entities under {parent}", remap.len());
        Some(remap)
    }

    /// Map a requested parent to the parent actually recorded, or `None` if
    /// the insert must be refused.
    fn resolve_parent(&self, parent: EntityId) -> Option<EntityId> {
        if parent.is_root() || self.entities.contains_key(&parent) {
            return Some(parent);
        }
        match self.config.missing_parent {
            MissingParentPolicy::TopLevel => {
                warn!("Parent entity {parent} not found, inserting as top-level");
                Some(EntityId::root())
            }
            MissingParentPolicy::Reject => {
                warn!("Parent entity {parent} not found, insert rejected");
                None
            }
        }
    }

    // ---- Removal ----

    /// Remove `id` together with its whole subtree. Returns `false` if absent.
    pub fn erase(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.entities.get(&id) else {
            return false;
        };
        let parent = entity.parent();
        if let Some(parent_entity) = self.entities.get_mut(&parent) {
            parent_entity.forget_child(id);
        }

        let removed = self.remove_subtree(id);
        debug!("Erased entity {id} and {} descendants", removed - 1);
        true
    }

    /// Cascade-erase every entity whose components satisfy `predicate`.
    /// Returns `true` if anything was removed.
    ///
    /// `predicate` must not depend on evaluation order.
    pub fn erase_if<P>(&mut self, predicate: P) -> bool
    where
        P: Fn(&ComponentCollection) -> bool,
    {
        let matches = self.filter(predicate);
        let mut removed_any = false;
        for id in matches {
            // An earlier match may already have taken this one down with its subtree.
            removed_any |= self.erase(id);
        }
        removed_any
    }

    /// Remove only `id`, handing back its components. Its children are not
    /// erased; they become top-level entities.
    pub fn extract(&mut self, id: EntityId) -> Option<ComponentCollection> {
        let entity = self.entities.remove(&id)?;
        if let Some(parent_entity) = self.entities.get_mut(&entity.parent()) {
            parent_entity.forget_child(id);
        }
        for child in entity.children() {
            if let Some(child_entity) = self.entities.get_mut(&child) {
                child_entity.remember_parent(EntityId::root());
            }
        }

        debug!("Extracted entity {id}, orphaning {} children", entity.child_count());
        Some(entity.into_components())
    }

    /// Iteratively remove `root` and its descendants. Returns how many
    /// entities were removed.
    ///
    /// Panics if an entity is reached twice, which only happens when the
    /// hierarchy is corrupt.
    fn remove_subtree(&mut self, root: EntityId) -> usize {
        let mut visited = HashSet::new();
        let mut worklist = vec![root];
        let mut removed = 0;

        while let Some(current) = worklist.pop() {
            assert!(
                visited.insert(current),
                "hierarchy corruption: entity {current} reached twice while erasing {root}"
            );
            if let Some(entity) = self.entities.remove(&current) {
                trace!("Removed entity {current}");
                worklist.extend(entity.children());
                removed += 1;
            }
        }
        removed
    }

    // ---- Access ----

    /// Components of `id`; fails if the entity is not stored.
    pub fn at(&self, id: EntityId) -> Result<&ComponentCollection> {
        self.get(id).ok_or(EcsError::EntityNotFound(id))
    }

    /// Mutable components of `id`; fails if the entity is not stored.
    pub fn at_mut(&mut self, id: EntityId) -> Result<&mut ComponentCollection> {
        self.get_mut(id).ok_or(EcsError::EntityNotFound(id))
    }

    pub fn get(&self, id: EntityId) -> Option<&ComponentCollection> {
        self.entities.get(&id).map(Entity::components)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut ComponentCollection> {
        self.entities.get_mut(&id).map(Entity::components_mut)
    }

    /// Read-only view of the stored entity, including its linkage.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &ComponentCollection)> {
        self.entities.iter().map(|(id, entity)| (*id, entity.components()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut ComponentCollection)> {
        self.entities
            .iter_mut()
            .map(|(id, entity)| (*id, entity.components_mut()))
    }

    // ---- Queries ----

    /// Ids of every entity whose components satisfy `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Vec<EntityId>
    where
        P: Fn(&ComponentCollection) -> bool,
    {
        self.entities
            .iter()
            .filter(|(_, entity)| predicate(entity.components()))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of entities whose components satisfy `predicate`.
    pub fn count_if<P>(&self, predicate: P) -> usize
    where
        P: Fn(&ComponentCollection) -> bool,
    {
        self.entities
            .values()
            .filter(|entity| predicate(entity.components()))
            .count()
    }

    /// Deep copy of the matching entities as a standalone registry. Links to
    /// entities outside the selection are dropped, so a selected entity whose
    /// parent was not selected becomes top-level in the copy.
    pub fn select<P>(&self, predicate: P) -> EntityCollection
    where
        P: Fn(&ComponentCollection) -> bool,
    {
        let mut selected: HashMap<EntityId, Entity> = self
            .entities
            .iter()
            .filter(|(_, entity)| predicate(entity.components()))
            .map(|(id, entity)| (*id, entity.clone()))
            .collect();

        let kept: HashSet<EntityId> = selected.keys().copied().collect();
        for entity in selected.values_mut() {
            if !entity.parent().is_root() && !kept.contains(&entity.parent()) {
                entity.remember_parent(EntityId::root());
            }
            let dropped: Vec<EntityId> = entity.children().filter(|c| !kept.contains(c)).collect();
            for child in dropped {
                entity.forget_child(child);
            }
        }

        EntityCollection {
            entities: selected,
            config: self.config.clone(),
        }
    }

    // ---- Hierarchy ----

    /// Recorded parent of `id`, or `None` if `id` is not stored.
    pub fn parent_of(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(&id).map(Entity::parent)
    }

    /// Direct children of `id`, or `None` if `id` is not stored.
    pub fn children_of(&self, id: EntityId) -> Option<Vec<EntityId>> {
        self.entities.get(&id).map(|entity| entity.children().collect())
    }

    /// Ids of every top-level entity.
    pub fn roots(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, entity)| entity.parent().is_root())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Parent chain of `id`, nearest first, not including root.
    pub fn ancestors(&self, id: EntityId) -> Vec<EntityId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut current = self.parent_of(id);

        while let Some(parent) = current.filter(|p| !p.is_root()) {
            assert!(
                seen.insert(parent),
                "hierarchy corruption: entity {id} is its own ancestor"
            );
            chain.push(parent);
            current = self.parent_of(parent);
        }
        chain
    }

    /// Every entity below `id`, in breadth-first order.
    pub fn descendants(&self, id: EntityId) -> Vec<EntityId> {
        let mut found = Vec::new();
        let mut seen = HashSet::from([id]);
        let mut frontier = self.children_of(id).unwrap_or_default();

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for child in frontier {
                assert!(
                    seen.insert(child),
                    "hierarchy corruption: entity {child} reached twice below {id}"
                );
                found.push(child);
                next.extend(self.children_of(child).unwrap_or_default());
            }
            frontier = next;
        }
        found
    }

    /// Transitive check: is `ancestor` somewhere on the parent chain of `id`?
    pub fn is_ancestor_of(&self, ancestor: EntityId, id: EntityId) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    /// Move `id` under `new_parent`, updating both the old and new parent's
    /// child sets. Returns `Ok(false)` if it already lives there.
    pub fn reparent(&mut self, id: EntityId, new_parent: EntityId) -> Result<bool> {
        let current = self.parent_of(id).ok_or(EcsError::EntityNotFound(id))?;
        if current == new_parent {
            return Ok(false);
        }
        if !new_parent.is_root() {
            if !self.entities.contains_key(&new_parent) {
                return Err(EcsError::ParentNotFound(new_parent));
            }
            if new_parent == id || self.is_ancestor_of(id, new_parent) {
                return Err(EcsError::HierarchyCycle {
                    entity: id,
                    parent: new_parent,
                });
            }
        }

        if let Some(old_parent) = self.entities.get_mut(&current) {
            old_parent.forget_child(id);
        }
        if let Some(parent_entity) = self.entities.get_mut(&new_parent) {
            parent_entity.remember_child(id);
        }
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.remember_parent(new_parent);
        }

        debug!("Reparented entity {id} from {current} to {new_parent}");
        Ok(true)
    }
}
