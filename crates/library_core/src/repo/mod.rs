//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per aggregate root.
//! - Isolate SQLite query details from service orchestration.
//! - Fold flat join rows into nested aggregates (`aggregate`).
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Repositories never catch, log or retry; every error reaches the caller.
//! - Repositories run on whatever connection they are given. Callers that
//!   need atomic multi-statement writes pass a transaction.

use crate::db::DbError;
use crate::model::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod aggregate;
pub mod author_repo;
pub mod book_repo;
pub mod comment_repo;
pub mod genre_repo;
pub mod row_mapper;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every catalog repository.
#[derive(Debug)]
pub enum RepoError {
    /// Storage transport, constraint or bootstrap failure.
    Db(DbError),
    /// Update target does not exist.
    NotFound { entity: &'static str, id: EntityId },
    /// Persisted row cannot be converted to a valid entity.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} with id {id} not found"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Builds `?, ?, ?` for an `IN (...)` predicate with `count` bind slots.
pub(crate) fn in_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
