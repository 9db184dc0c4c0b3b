//! Book use-case service.
//!
//! # Responsibility
//! - Resolve author and genre references for book writes.
//! - Run each write (book row plus link rows) in one transaction.
//!
//! # Invariants
//! - A book write names at least one genre.
//! - Every referenced genre id must exist; otherwise nothing is written.
//! - Genres are stored in the order the caller listed them, duplicates
//!   dropped.

use crate::convert::BookDto;
use crate::db::with_transaction;
use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::genre::Genre;
use crate::model::{EntityId, TRANSIENT_ID};
use crate::repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
use crate::repo::book_repo::{BookRepository, SqliteBookRepository};
use crate::repo::genre_repo::{GenreRepository, SqliteGenreRepository};
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};
use rusqlite::Connection;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Book use-cases over one catalog connection.
pub struct BookService<'conn> {
    conn: &'conn mut Connection,
}

/// Write request for inserting or updating a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookWrite {
    pub title: String,
    pub author_id: EntityId,
    pub genre_ids: Vec<EntityId>,
}

impl BookWrite {
    pub fn new(title: impl Into<String>, author_id: EntityId, genre_ids: Vec<EntityId>) -> Self {
        Self {
            title: title.into(),
            author_id,
            genre_ids,
        }
    }
}

impl<'conn> BookService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    pub fn find_by_id(&self, id: EntityId) -> ServiceResult<Option<BookDto>> {
        let book = SqliteBookRepository::new(self.conn).find_by_id(id)?;
        Ok(book.as_ref().map(BookDto::from))
    }

    /// Lists all books ordered by id.
    pub fn find_all(&self) -> ServiceResult<Vec<BookDto>> {
        let books = SqliteBookRepository::new(self.conn).find_all()?;
        Ok(books.iter().map(BookDto::from).collect())
    }

    /// Inserts a new book and returns it with its assigned id.
    pub fn insert(&mut self, request: &BookWrite) -> ServiceResult<BookDto> {
        let result = with_transaction(self.conn, |tx| {
            let book = resolve_book(tx, TRANSIENT_ID, request)?;
            Ok::<_, ServiceError>(SqliteBookRepository::new(tx).save(book)?)
        });
        log_write("book_insert", result.as_ref().map(|book| book.id));
        Ok(BookDto::from(&result?))
    }

    /// Replaces title, author and the whole genre list of book `id`.
    pub fn update(&mut self, id: EntityId, request: &BookWrite) -> ServiceResult<BookDto> {
        let result = with_transaction(self.conn, |tx| {
            let book = resolve_book(tx, id, request)?;
            Ok::<_, ServiceError>(SqliteBookRepository::new(tx).save(book)?)
        });
        log_write("book_update", result.as_ref().map(|book| book.id));
        Ok(BookDto::from(&result?))
    }

    /// Deletes a book with its comments. Deleting an absent id succeeds.
    pub fn delete_by_id(&mut self, id: EntityId) -> ServiceResult<()> {
        let result = with_transaction(self.conn, |tx| {
            SqliteBookRepository::new(tx).delete_by_id(id)?;
            Ok::<_, ServiceError>(id)
        });
        log_write("book_delete", result.as_ref().copied());
        result.map(|_| ())
    }
}

fn resolve_book(conn: &Connection, id: EntityId, request: &BookWrite) -> ServiceResult<Book> {
    if request.genre_ids.is_empty() {
        return Err(ServiceError::InvalidArgument(
            "genre ids must not be empty".to_string(),
        ));
    }

    let author = find_author(conn, request.author_id)?;
    let genres = find_genres(conn, &request.genre_ids)?;
    Ok(Book::with_id(id, request.title.as_str(), author, genres))
}

fn find_author(conn: &Connection, author_id: EntityId) -> ServiceResult<Author> {
    SqliteAuthorRepository::new(conn)
        .find_by_id(author_id)?
        .ok_or_else(|| ServiceError::NotFound(format!("author with id {author_id} not found")))
}

fn find_genres(conn: &Connection, genre_ids: &[EntityId]) -> ServiceResult<Vec<Genre>> {
    let wanted: BTreeSet<EntityId> = genre_ids.iter().copied().collect();
    let found = SqliteGenreRepository::new(conn).find_all_by_ids(&wanted)?;
    if found.len() != wanted.len() {
        let found_ids: HashSet<EntityId> = found.iter().map(|genre| genre.id).collect();
        let missing: Vec<EntityId> = wanted
            .iter()
            .copied()
            .filter(|id| !found_ids.contains(id))
            .collect();
        return Err(ServiceError::NotFound(format!(
            "genres with ids {missing:?} not found"
        )));
    }

    let mut by_id: HashMap<EntityId, Genre> =
        found.into_iter().map(|genre| (genre.id, genre)).collect();
    Ok(genre_ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

fn log_write(event: &str, result: Result<EntityId, &ServiceError>) {
    match result {
        Ok(book_id) => info!("event={event} module=service status=ok book_id={book_id}"),
        Err(err) => warn!(
            "event={event} module=service status=error error_code={} error={err}",
            err.code()
        ),
    }
}
