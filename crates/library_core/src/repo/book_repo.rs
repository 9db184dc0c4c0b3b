//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load books with their author and genres in one eager join.
//! - Persist the book row and its `books_genres` links.
//!
//! # Invariants
//! - Reads outer-join `books_genres`, so a book without genres is still
//!   returned, with an empty genre list.
//! - `find_all` is ordered by `books.id ASC`; genres keep link insertion order.
//! - `save` on an existing id replaces all links; it never diffs.
//! - `delete_by_id` removes comments and links before the book row.
//!
//! Callers wrap `save`/`delete_by_id` in one transaction
//! (`db::with_transaction`); the repository itself issues plain statements.

use crate::model::book::Book;
use crate::model::genre::Genre;
use crate::model::{EntityId, Identified};
use crate::repo::aggregate::RelationAggregator;
use crate::repo::row_mapper::{map_book_genre, map_book_head, BOOK_ID_COLUMN};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Params};

const BOOK_JOIN_SQL: &str = "SELECT
    b.id AS book_id,
    b.title AS book_title,
    a.id AS author_id,
    a.full_name AS author_full_name,
    g.id AS genre_id,
    g.name AS genre_name
FROM books b
    INNER JOIN authors a ON a.id = b.author_id
    LEFT JOIN books_genres bg ON bg.book_id = b.id
    LEFT JOIN genres g ON g.id = bg.genre_id";

const BOOK_JOIN_ORDER_SQL: &str = "ORDER BY b.id ASC, bg.rowid ASC";

/// Repository interface for the book aggregate.
pub trait BookRepository {
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Book>>;
    fn find_all(&self) -> RepoResult<Vec<Book>>;
    /// Inserts a transient book or updates an existing one.
    ///
    /// Returns the book with its identity set and genres as passed in
    /// (deduplicated), not re-read from storage.
    fn save(&self, book: Book) -> RepoResult<Book>;
    /// Deletes the book with its links and comments. Absent ids are a no-op.
    fn delete_by_id(&self, id: EntityId) -> RepoResult<()>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_books<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut books = RelationAggregator::new();
        while let Some(row) = rows.next()? {
            let book_id: EntityId = row.get(BOOK_ID_COLUMN)?;
            let genre = map_book_genre(row)?;
            books.push_row(book_id, || map_book_head(row), genre)?;
        }
        Ok(books.finish())
    }

    fn insert(&self, mut book: Book) -> RepoResult<Book> {
        self.conn.execute(
            "INSERT INTO books (title, author_id) VALUES (?1, ?2);",
            params![book.title.as_str(), book.author.id],
        )?;
        book.id = self.conn.last_insert_rowid();
        Ok(book)
    }

    fn update(&self, book: Book) -> RepoResult<Book> {
        let changed = self.conn.execute(
            "UPDATE books SET title = ?1, author_id = ?2 WHERE id = ?3;",
            params![book.title.as_str(), book.author.id, book.id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "book",
                id: book.id,
            });
        }

        self.conn
            .execute("DELETE FROM books_genres WHERE book_id = ?1;", [book.id])?;
        Ok(book)
    }

    fn insert_genre_links(&self, book_id: EntityId, genres: &[Genre]) -> RepoResult<()> {
        if genres.is_empty() {
            return Ok(());
        }

        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO books_genres (book_id, genre_id) VALUES (?1, ?2);")?;
        for genre in genres {
            stmt.execute(params![book_id, genre.id])?;
        }
        Ok(())
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Book>> {
        let sql = format!("{BOOK_JOIN_SQL} WHERE b.id = ?1 {BOOK_JOIN_ORDER_SQL};");
        Ok(self.query_books(&sql, [id])?.into_iter().next())
    }

    fn find_all(&self) -> RepoResult<Vec<Book>> {
        let sql = format!("{BOOK_JOIN_SQL} {BOOK_JOIN_ORDER_SQL};");
        self.query_books(&sql, [])
    }

    fn save(&self, mut book: Book) -> RepoResult<Book> {
        book.genres = book.distinct_genres().into_iter().cloned().collect();

        let saved = if book.is_transient() {
            self.insert(book)?
        } else {
            self.update(book)?
        };
        self.insert_genre_links(saved.id, &saved.genres)?;
        Ok(saved)
    }

    fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM comments WHERE book_id = ?1;", [id])?;
        self.conn
            .execute("DELETE FROM books_genres WHERE book_id = ?1;", [id])?;
        self.conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;
        Ok(())
    }
}
