//! Genre lookup entity.

use super::{EntityId, Identified};
use serde::{Deserialize, Serialize};

/// Book genre. Shared between books; a book owns only its list of genres.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: EntityId,
    pub name: String,
}

impl Genre {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Identified for Genre {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl PartialEq for Genre {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
