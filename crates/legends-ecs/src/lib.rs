//! Legends ECS - Entity Component System storage for the Dungeon Legends engine
//!
//! The storage, identity and hierarchy layer beneath gameplay code:
//! - [`ComponentCollection`]: one owned component per type, deep-copyable
//! - [`EntityCollection`]: the registry, with a parent/child forest and
//!   cascading deletion
//! - [`Archetype`]: type-level required component sets
//!
//! Nothing here schedules update logic; callers drive the registry directly.

mod archetype;
mod component;
mod component_collection;
mod config;
mod entity;
mod entity_collection;
mod error;
mod shared;

pub use archetype::Archetype;
pub use component::{Component, ComponentSet, TagComponent};
pub use component_collection::ComponentCollection;
pub use config::{MissingParentPolicy, RegistryConfig};
pub use entity::Entity;
pub use entity_collection::EntityCollection;
pub use error::{EcsError, Result};
pub use legends_core::EntityId;
pub use shared::SharedEntityCollection;
