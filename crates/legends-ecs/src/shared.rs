use std::sync::Arc;

use parking_lot::RwLock;

use crate::entity_collection::EntityCollection;

/// A registry behind a single reader-writer lock, for callers that drive it
/// from more than one thread. The registry itself does no locking.
pub type SharedEntityCollection = Arc<RwLock<EntityCollection>>;

impl EntityCollection {
    /// Wrap the registry for shared, externally synchronized use.
    pub fn into_shared(self) -> SharedEntityCollection {
        Arc::new(RwLock::new(self))
    }
}
