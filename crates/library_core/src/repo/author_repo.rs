//! Author repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Lists are ordered by `id ASC`.
//! - `find_all_by_ids` with an empty set returns without touching storage.

use crate::model::author::Author;
use crate::model::EntityId;
use crate::repo::row_mapper::map_author;
use crate::repo::{in_placeholders, RepoResult};
use rusqlite::{params_from_iter, Connection, Params};
use std::collections::BTreeSet;

const AUTHOR_SELECT_SQL: &str = "SELECT id, full_name FROM authors";

/// Read-only repository for authors.
pub trait AuthorRepository {
    fn find_all(&self) -> RepoResult<Vec<Author>>;
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Author>>;
    fn find_all_by_ids(&self, ids: &BTreeSet<EntityId>) -> RepoResult<Vec<Author>>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_authors<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Author>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(map_author(row, "id", "full_name")?);
        }
        Ok(authors)
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Author>> {
        self.query_authors(&format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Author>> {
        let authors = self.query_authors(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(authors.into_iter().next())
    }

    fn find_all_by_ids(&self, ids: &BTreeSet<EntityId>) -> RepoResult<Vec<Author>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "{AUTHOR_SELECT_SQL} WHERE id IN ({}) ORDER BY id ASC;",
            in_placeholders(ids.len())
        );
        self.query_authors(&sql, params_from_iter(ids.iter()))
    }
}
