//! Genre repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Lists are ordered by `id ASC`.
//! - `find_all_by_ids` with an empty set returns without touching storage,
//!   so no `IN ()` predicate is ever generated.
//! - Unknown ids are skipped, not reported; callers compare result sizes.

use crate::model::genre::Genre;
use crate::model::EntityId;
use crate::repo::row_mapper::map_genre;
use crate::repo::{in_placeholders, RepoResult};
use rusqlite::{params_from_iter, Connection, Params};
use std::collections::BTreeSet;

const GENRE_SELECT_SQL: &str = "SELECT id, name FROM genres";

/// Read-only repository for genres.
pub trait GenreRepository {
    fn find_all(&self) -> RepoResult<Vec<Genre>>;
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Genre>>;
    fn find_all_by_ids(&self, ids: &BTreeSet<EntityId>) -> RepoResult<Vec<Genre>>;
}

/// SQLite-backed genre repository.
pub struct SqliteGenreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGenreRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_genres<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Genre>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut genres = Vec::new();
        while let Some(row) = rows.next()? {
            genres.push(map_genre(row, "id", "name")?);
        }
        Ok(genres)
    }
}

impl GenreRepository for SqliteGenreRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Genre>> {
        self.query_genres(&format!("{GENRE_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Genre>> {
        let genres = self.query_genres(&format!("{GENRE_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(genres.into_iter().next())
    }

    fn find_all_by_ids(&self, ids: &BTreeSet<EntityId>) -> RepoResult<Vec<Genre>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "{GENRE_SELECT_SQL} WHERE id IN ({}) ORDER BY id ASC;",
            in_placeholders(ids.len())
        );
        self.query_genres(&sql, params_from_iter(ids.iter()))
    }
}
