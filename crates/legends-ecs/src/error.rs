use legends_core::EntityId;

/// Errors surfaced by direct-access and hierarchy-editing operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("parent entity {0} not found")]
    ParentNotFound(EntityId),

    #[error("cannot parent entity {entity} under {parent}: it would become its own ancestor")]
    HierarchyCycle { entity: EntityId, parent: EntityId },
}

pub type Result<T> = std::result::Result<T, EcsError>;
