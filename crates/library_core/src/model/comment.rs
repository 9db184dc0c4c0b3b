//! Comment aggregate root.

use super::book::Book;
use super::{EntityId, Identified, TRANSIENT_ID};
use serde::{Deserialize, Serialize};

/// Reader comment attached to exactly one book.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub content: String,
    pub book: Book,
}

impl Comment {
    /// Creates a transient comment for `book`.
    pub fn new(content: impl Into<String>, book: Book) -> Self {
        Self::with_id(TRANSIENT_ID, content, book)
    }

    pub fn with_id(id: EntityId, content: impl Into<String>, book: Book) -> Self {
        Self {
            id,
            content: content.into(),
            book,
        }
    }
}

impl Identified for Comment {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl PartialEq for Comment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
