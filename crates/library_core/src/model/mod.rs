//! Library catalog domain model.
//!
//! # Responsibility
//! - Define the value structs read from and written to the catalog.
//! - Define the identity contract shared by every entity.
//!
//! # Invariants
//! - Equality of entities compares identity (`id`) only.
//! - `id == 0` marks a transient entity that has not been persisted yet.
//! - Entities are built fresh on every read; there is no identity map.

pub mod author;
pub mod book;
pub mod comment;
pub mod genre;

/// Database identity of every catalog entity.
pub type EntityId = i64;

/// Identity value carried by entities that were never persisted.
pub const TRANSIENT_ID: EntityId = 0;

/// Entity with a stable database identity.
pub trait Identified {
    fn id(&self) -> EntityId;

    /// Returns whether this entity still waits for its first insert.
    fn is_transient(&self) -> bool {
        self.id() == TRANSIENT_ID
    }
}
