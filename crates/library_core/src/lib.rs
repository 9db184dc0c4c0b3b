//! Library catalog core: books, authors, genres and comments over SQLite.
//!
//! Flat join rows are folded into nested aggregates by
//! [`repo::aggregate::RelationAggregator`]; services wrap repository writes in
//! one transaction each and hand DTOs to callers.

pub mod config;
pub mod convert;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use convert::{AuthorDto, BookDto, CommentDto, GenreDto};
pub use db::{open_db, open_db_in_memory, with_transaction, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::author::Author;
pub use model::book::Book;
pub use model::comment::Comment;
pub use model::genre::Genre;
pub use model::{EntityId, Identified, TRANSIENT_ID};
pub use repo::aggregate::{aggregate_rows, Aggregate, RelationAggregator};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::comment_repo::{CommentRepository, SqliteCommentRepository};
pub use repo::genre_repo::{GenreRepository, SqliteGenreRepository};
pub use repo::{RepoError, RepoResult};
pub use service::book_service::{BookService, BookWrite};
pub use service::comment_service::CommentService;
pub use service::lookup_service::{AuthorService, GenreService};
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
