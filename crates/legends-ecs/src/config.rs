use serde::{Deserialize, Serialize};

/// What [`crate::EntityCollection::insert`] does when the requested parent
/// is neither root nor present in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingParentPolicy {
    /// Store the entity as top-level (parent = root) and log a warning.
    #[default]
    TopLevel,
    /// Store nothing; the insert reports failure.
    Reject,
}

/// Registry behaviour settings. Maps to the `[registry]` table of the game's
/// settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub missing_parent: MissingParentPolicy,
}

impl RegistryConfig {
    /// Config that rejects inserts under unknown parents.
    pub fn strict() -> Self {
        Self {
            missing_parent: MissingParentPolicy::Reject,
        }
    }
}
