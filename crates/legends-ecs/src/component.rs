use std::any::{Any, TypeId};

use crate::component_collection::ComponentCollection;

/// Capability for types that can be stored as ECS components.
///
/// Components are default-constructible so archetypes can synthesize them,
/// and cloneable so a [`ComponentCollection`] can be deep-copied. Each type
/// opts in explicitly:
///
/// ```ignore
/// #[derive(Debug, Clone, Default)]
/// struct Position { x: f32, y: f32 }
/// impl Component for Position {}
/// ```
pub trait Component: Any + Clone + Default + Send + Sync {}

/// A zero-data marker component, used only for presence checks
/// (e.g. "is moveable").
pub trait TagComponent: Component {}

/// Type-erased component slot. Every [`Component`] gets this for free; it is
/// what lets a collection clone its contents without knowing their types.
pub(crate) trait ComponentBox: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn clone_box(&self) -> Box<dyn ComponentBox>;
    fn type_name(&self) -> &'static str;
}

impl<T: Component> ComponentBox for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_box(&self) -> Box<dyn ComponentBox> {
        Box::new(self.clone())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A fixed list of component types, written as a tuple: `(Position, Velocity)`.
///
/// Used for multi-type presence checks and by [`crate::Archetype`].
pub trait ComponentSet: 'static {
    /// Type keys of every member, in declaration order.
    fn type_ids() -> Vec<TypeId>;

    /// Type names of every member, in declaration order.
    fn type_names() -> Vec<&'static str>;

    /// Default-construct every member missing from `collection`.
    /// Returns how many were inserted.
    fn emplace_missing(collection: &mut ComponentCollection) -> usize;
}

macro_rules! impl_component_set_tuple {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(TypeId::of::<$name>()),+]
            }

            fn type_names() -> Vec<&'static str> {
                vec![$(std::any::type_name::<$name>()),+]
            }

            fn emplace_missing(collection: &mut ComponentCollection) -> usize {
                let mut inserted = 0;
                // No short-circuit: every missing member gets a default.
                $(
                    if collection.try_emplace_default::<$name>() {
                        inserted += 1;
                    }
                )+
                inserted
            }
        }
    };
}

impl_component_set_tuple!(A);
impl_component_set_tuple!(A, B);
impl_component_set_tuple!(A, B, C);
impl_component_set_tuple!(A, B, C, D);
impl_component_set_tuple!(A, B, C, D, E);
impl_component_set_tuple!(A, B, C, D, E, F);
impl_component_set_tuple!(A, B, C, D, E, F, G);
impl_component_set_tuple!(A, B, C, D, E, F, G, H);
