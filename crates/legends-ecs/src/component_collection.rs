use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use crate::component::{Component, ComponentBox, ComponentSet};

/// Per-entity heterogeneous component store.
///
/// Holds at most one component per type. Every insertion except
/// [`insert_or_assign`](Self::insert_or_assign) refuses to overwrite.
/// Components are exclusively owned; cloning the collection clones each
/// component by value.
#[derive(Default)]
pub struct ComponentCollection {
    components: HashMap<TypeId, Box<dyn ComponentBox>>,
}

impl ComponentCollection {
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    // ---- State ----

    /// Number of components in the collection.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Drop every component.
    pub fn clear(&mut self) {
        self.components.clear();
    }

    // ---- Insertion ----

    /// Insert `value` if no component of type `C` is present.
    /// Returns `false` and leaves the collection untouched otherwise.
    pub fn try_emplace<C: Component>(&mut self, value: C) -> bool {
        self.try_emplace_with(|| value)
    }

    /// Like [`try_emplace`](Self::try_emplace), but only constructs the
    /// component when the slot is free.
    pub fn try_emplace_with<C: Component>(&mut self, make: impl FnOnce() -> C) -> bool {
        match self.components.entry(TypeId::of::<C>()) {
            Entry::Vacant(slot) => {
                slot.insert(Box::new(make()));
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Insert a default-constructed `C` if absent.
    pub fn try_emplace_default<C: Component>(&mut self) -> bool {
        self.try_emplace_with(C::default)
    }

    /// Insert `value`, replacing any existing `C`.
    /// Returns `true` if the component was newly inserted, `false` if replaced.
    pub fn insert_or_assign<C: Component>(&mut self, value: C) -> bool {
        self.components
            .insert(TypeId::of::<C>(), Box::new(value))
            .is_none()
    }

    // ---- Removal ----

    /// Remove the `C` component. Returns `true` if it was present.
    pub fn erase<C: Component>(&mut self) -> bool {
        self.components.remove(&TypeId::of::<C>()).is_some()
    }

    /// Remove the `C` component and hand it back by value.
    pub fn extract<C: Component>(&mut self) -> Option<C> {
        let boxed = self.components.remove(&TypeId::of::<C>())?;
        boxed.into_any().downcast::<C>().ok().map(|component| *component)
    }

    // ---- Access ----

    pub fn get<C: Component>(&self) -> Option<&C> {
        self.components
            .get(&TypeId::of::<C>())
            .and_then(|c| c.as_any().downcast_ref::<C>())
    }

    pub fn get_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.components
            .get_mut(&TypeId::of::<C>())
            .and_then(|c| c.as_any_mut().downcast_mut::<C>())
    }

    // ---- Queries ----

    pub fn has<C: Component>(&self) -> bool {
        self.contains_type_id(TypeId::of::<C>())
    }

    /// Whether a component with the given type key is present.
    pub fn contains_type_id(&self, type_id: TypeId) -> bool {
        self.components.contains_key(&type_id)
    }

    /// True if every member of `S` is present.
    pub fn has_all<S: ComponentSet>(&self) -> bool {
        S::type_ids().into_iter().all(|id| self.contains_type_id(id))
    }

    /// True if at least one member of `S` is present.
    pub fn has_any<S: ComponentSet>(&self) -> bool {
        S::type_ids().into_iter().any(|id| self.contains_type_id(id))
    }

    /// True if no member of `S` is present.
    pub fn has_none_of<S: ComponentSet>(&self) -> bool {
        !self.has_any::<S>()
    }

    /// Type names of the stored components, sorted for stable output.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.components.values().map(|c| c.type_name()).collect();
        names.sort_unstable();
        names
    }
}

impl Clone for ComponentCollection {
    fn clone(&self) -> Self {
        Self {
            components: self
                .components
                .iter()
                .map(|(type_id, component)| (*type_id, component.clone_box()))
                .collect(),
        }
    }
}

impl fmt::Debug for ComponentCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.type_names()).finish()
    }
}
