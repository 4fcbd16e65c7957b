use std::marker::PhantomData;

use crate::component::ComponentSet;
use crate::component_collection::ComponentCollection;

/// A fixed set of required component types, declared at the type level.
///
/// ```ignore
/// type Moveable = Archetype<(MoveableTag, Position, Velocity)>;
///
/// let mut collection = Moveable::create_instance();
/// assert!(Moveable::is_presented_in(&collection));
/// ```
///
/// Archetypes are never instantiated; every operation is an associated function.
pub struct Archetype<S: ComponentSet>(PhantomData<fn() -> S>);

impl<S: ComponentSet> Archetype<S> {
    /// True if every required component is present in `collection`.
    pub fn is_presented_in(collection: &ComponentCollection) -> bool {
        collection.has_all::<S>()
    }

    /// A fresh collection holding one default-constructed instance of each
    /// required component.
    pub fn create_instance() -> ComponentCollection {
        let mut collection = ComponentCollection::new();
        S::emplace_missing(&mut collection);
        collection
    }

    /// Default-construct every required component missing from `collection`.
    ///
    /// Returns `true` if at least one component was added. Components already
    /// present are left as they are, so a second call returns `false` and
    /// changes nothing.
    pub fn supplement(collection: &mut ComponentCollection) -> bool {
        S::emplace_missing(collection) > 0
    }

    /// Type names of the required components not present in `collection`.
    pub fn missing_in(collection: &ComponentCollection) -> Vec<&'static str> {
        S::type_ids()
            .into_iter()
            .zip(S::type_names())
            .filter(|(id, _)| !collection.contains_type_id(*id))
            .map(|(_, name)| name)
            .collect()
    }

    /// Number of required component types.
    pub fn component_count() -> usize {
        S::type_ids().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, TagComponent};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }
    impl Component for Position {}

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }
    impl Component for Velocity {}

    #[derive(Debug, Clone, Default, PartialEq)]
    struct MoveableMarker;
    impl Component for MoveableMarker {}
    impl TagComponent for MoveableMarker {}

    type Kinematic = Archetype<(Position, Velocity)>;
    type Moveable = Archetype<(MoveableMarker, Position, Velocity)>;

    #[test]
    fn create_instance_is_presented() {
        let collection = Kinematic::create_instance();
        assert_eq!(collection.len(), 2);
        assert!(Kinematic::is_presented_in(&collection));
        assert_eq!(collection.get::<Position>(), Some(&Position::default()));
    }

    #[test]
    fn supplement_completes_empty_collection() {
        let mut collection = ComponentCollection::new();
        assert!(!Kinematic::is_presented_in(&collection));
        assert!(Kinematic::supplement(&mut collection));
        assert!(Kinematic::is_presented_in(&collection));
    }

    #[test]
    fn supplement_twice_is_noop() {
        let mut collection = ComponentCollection::new();
        assert!(Moveable::supplement(&mut collection));
        collection.get_mut::<Position>().unwrap().x = 4.0;

        assert!(!Moveable::supplement(&mut collection));
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get::<Position>().unwrap().x, 4.0);
    }

    #[test]
    fn supplement_fills_every_gap_not_just_first() {
        let mut collection = ComponentCollection::new();
        collection.try_emplace(Velocity { dx: 1.0, dy: 2.0 });
        assert!(Moveable::supplement(&mut collection));
        assert!(collection.has::<MoveableMarker>());
        assert!(collection.has::<Position>());
        assert_eq!(collection.get::<Velocity>(), Some(&Velocity { dx: 1.0, dy: 2.0 }));
    }

    #[test]
    fn supplement_on_complete_collection_reports_false() {
        let mut collection = Moveable::create_instance();
        assert!(!Moveable::supplement(&mut collection));
    }

    #[test]
    fn missing_components_are_named() {
        let mut collection = ComponentCollection::new();
        collection.try_emplace(Position::default());
        let missing = Moveable::missing_in(&collection);
        assert_eq!(missing.len(), 2);
        assert!(missing[0].ends_with("MoveableMarker"));
        assert!(missing[1].ends_with("Velocity"));
        assert_eq!(Moveable::component_count(), 3);
    }

    #[test]
    fn superset_collection_is_presented() {
        let collection = Moveable::create_instance();
        assert!(Kinematic::is_presented_in(&collection));
        assert!(!Moveable::is_presented_in(&Kinematic::create_instance()));
    }
}
