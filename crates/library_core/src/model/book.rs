//! Book aggregate root.
//!
//! # Invariants
//! - `author` is always resolved; a book read from storage never lacks one.
//! - `genres` holds no duplicate ids and keeps first-seen order.

use super::author::Author;
use super::genre::Genre;
use super::{EntityId, Identified, TRANSIENT_ID};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Catalog book with its author and ordered genre list.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: EntityId,
    /// Unique across the catalog; enforced by the schema.
    pub title: String,
    pub author: Author,
    pub genres: Vec<Genre>,
}

impl Book {
    /// Creates a transient book. `save` assigns the identity.
    pub fn new(title: impl Into<String>, author: Author, genres: Vec<Genre>) -> Self {
        Self::with_id(TRANSIENT_ID, title, author, genres)
    }

    pub fn with_id(
        id: EntityId,
        title: impl Into<String>,
        author: Author,
        genres: Vec<Genre>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author,
            genres,
        }
    }

    /// Genre ids in list order.
    pub fn genre_ids(&self) -> Vec<EntityId> {
        self.genres.iter().map(|genre| genre.id).collect()
    }

    /// Returns the genres with repeated ids removed, first occurrence wins.
    pub fn distinct_genres(&self) -> Vec<&Genre> {
        let mut seen = HashSet::new();
        self.genres
            .iter()
            .filter(|genre| seen.insert(genre.id))
            .collect()
    }
}

impl Identified for Book {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
