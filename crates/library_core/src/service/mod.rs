//! Catalog use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs returning DTOs.
//! - Own the transaction boundary: every write runs in one
//!   `db::with_transaction` scope, so a failed step leaves storage unchanged.
//!
//! # Invariants
//! - Repository `NotFound` errors surface as `ServiceError::NotFound`.
//! - Service writes emit one `event=<entity>_<op>` log line per call.

use crate::db::DbError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod book_service;
pub mod comment_service;
pub mod lookup_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced author/genre/book/comment does not exist.
    NotFound(String),
    /// Request is structurally unusable (for example no genres given).
    InvalidArgument(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Short stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Repo(_) => "repo_error",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message) => write!(f, "{message}"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { .. } => Self::NotFound(value.to_string()),
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::Db(DbError::Sqlite(value)))
    }
}
