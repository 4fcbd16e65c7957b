//! Legends Core - Core types for the Dungeon Legends engine
//!
//! This crate provides the foundational types shared by the engine crates:
//! - Entity identity (`EntityId`) with a distinguished root sentinel

pub mod entity_id;

pub use entity_id::EntityId;
