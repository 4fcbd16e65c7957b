use std::collections::HashSet;

use legends_core::EntityId;

use crate::component_collection::ComponentCollection;

/// An entity's stored state: its components plus its place in the hierarchy.
///
/// `Entity` only records linkage. Keeping a parent's child set and each
/// child's recorded parent in agreement is the job of
/// [`crate::EntityCollection`], which is the only code that writes both.
#[derive(Debug, Clone)]
pub struct Entity {
    parent: EntityId,
    children: HashSet<EntityId>,
    components: ComponentCollection,
}

impl Entity {
    /// A top-level entity owning `components`.
    pub fn new(components: ComponentCollection) -> Self {
        Self::with_parent(components, EntityId::root())
    }

    pub fn with_parent(components: ComponentCollection, parent: EntityId) -> Self {
        Self {
            parent,
            children: HashSet::new(),
            components,
        }
    }

    // ---- Hierarchy ----

    /// Recorded parent id; root for top-level entities.
    pub fn parent(&self) -> EntityId {
        self.parent
    }

    /// Overwrite the recorded parent. Does not touch any other entity.
    pub fn remember_parent(&mut self, parent: EntityId) {
        self.parent = parent;
    }

    /// One-hop check: is `id` this entity's parent?
    pub fn is_child_of(&self, id: EntityId) -> bool {
        self.parent == id
    }

    /// One-hop check: is `id` among this entity's children?
    pub fn is_parent_of(&self, id: EntityId) -> bool {
        self.children.contains(&id)
    }

    /// Add `child` to the child set. Returns `true` if the set changed.
    pub fn remember_child(&mut self, child: EntityId) -> bool {
        self.children.insert(child)
    }

    /// Remove `child` from the child set. Returns `true` if the set changed.
    pub fn forget_child(&mut self, child: EntityId) -> bool {
        self.children.remove(&child)
    }

    pub fn forget_children(&mut self) {
        self.children.clear();
    }

    pub fn children(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.children.iter().copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    // ---- Components ----

    pub fn components(&self) -> &ComponentCollection {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut ComponentCollection {
        &mut self.components
    }

    /// Replace the component data. Pass `collection.clone()` to keep the caller's copy.
    pub fn set_components(&mut self, components: ComponentCollection) {
        self.components = components;
    }

    /// Deep copy of the component data with an independent lifetime.
    pub fn clone_components(&self) -> ComponentCollection {
        self.components.clone()
    }

    /// Consume the entity, keeping only its component data.
    pub fn into_components(self) -> ComponentCollection {
        self.components
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(ComponentCollection::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Name(String);
    impl Component for Name {}

    #[test]
    fn default_parent_is_root() {
        let entity = Entity::default();
        assert!(entity.parent().is_root());
        assert!(entity.is_child_of(EntityId::root()));
        assert_eq!(entity.child_count(), 0);
    }

    #[test]
    fn remember_parent_overwrites() {
        let parent = EntityId::new();
        let mut entity = Entity::default();
        entity.remember_parent(parent);
        assert!(entity.is_child_of(parent));
        assert!(!entity.is_child_of(EntityId::root()));
    }

    #[test]
    fn child_set_toggles_report_changes() {
        let child = EntityId::new();
        let mut entity = Entity::default();

        assert!(entity.remember_child(child));
        assert!(!entity.remember_child(child));
        assert!(entity.is_parent_of(child));
        assert_eq!(entity.child_count(), 1);

        assert!(entity.forget_child(child));
        assert!(!entity.forget_child(child));
        assert!(!entity.is_parent_of(child));
    }

    #[test]
    fn forget_children_clears_set() {
        let mut entity = Entity::default();
        entity.remember_child(EntityId::new());
        entity.remember_child(EntityId::new());
        entity.forget_children();
        assert_eq!(entity.children().count(), 0);
    }

    #[test]
    fn relations_are_one_hop() {
        let grandparent = EntityId::new();
        let parent = EntityId::new();
        let mut entity = Entity::with_parent(ComponentCollection::new(), parent);
        entity.remember_child(EntityId::new());
        assert!(entity.is_child_of(parent));
        assert!(!entity.is_child_of(grandparent));
    }

    #[test]
    fn cloned_components_are_independent() {
        let mut components = ComponentCollection::new();
        components.try_emplace(Name("goblin".into()));
        let mut entity = Entity::new(components);

        let mut copy = entity.clone_components();
        copy.get_mut::<Name>().unwrap().0 = "orc".into();

        assert_eq!(entity.components().get::<Name>(), Some(&Name("goblin".into())));
        entity.set_components(copy);
        assert_eq!(entity.components().get::<Name>(), Some(&Name("orc".into())));
        entity.components_mut().erase::<Name>();
        assert!(entity.components().is_empty());
    }
}
