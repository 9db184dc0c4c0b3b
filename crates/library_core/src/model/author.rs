//! Author lookup entity.

use super::{EntityId, Identified};
use serde::{Deserialize, Serialize};

/// Book author. Immutable once loaded.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: EntityId,
    pub full_name: String,
}

impl Author {
    pub fn new(id: EntityId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
        }
    }
}

impl Identified for Author {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
