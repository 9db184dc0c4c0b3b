//! Reference catalog fixture.
//!
//! # Responsibility
//! - Load the demo catalog used by the CLI `seed` command and by tests.
//!
//! # Invariants
//! - Seeding is idempotent: a catalog holding any author, genre or book is
//!   left as is, since fixture rows use fixed ids.
//! - Book `i` is written by `Author_i` and tagged with genres `2i-1` and `2i`.
//! - Every book carries `COMMENTS_PER_BOOK` comments.

use super::{with_transaction, DbError, DbResult};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};

pub const SEED_AUTHORS: i64 = 3;
pub const SEED_GENRES: i64 = 6;
pub const SEED_BOOKS: i64 = 3;
pub const COMMENTS_PER_BOOK: i64 = 2;

/// Loads the reference fixture into an empty catalog.
///
/// Returns `true` when rows were written and `false` when any of the
/// fixture tables already had rows.
pub fn seed_demo_data(conn: &mut Connection) -> DbResult<bool> {
    let occupied: Option<String> = conn
        .query_row(
            "SELECT name FROM (
                SELECT 'authors' AS name WHERE EXISTS (SELECT 1 FROM authors)
                UNION ALL
                SELECT 'genres' WHERE EXISTS (SELECT 1 FROM genres)
                UNION ALL
                SELECT 'books' WHERE EXISTS (SELECT 1 FROM books)
            )
            LIMIT 1;",
            [],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(table) = occupied {
        info!("event=db_seed module=db status=skipped non_empty_table={table}");
        return Ok(false);
    }

    with_transaction(conn, |tx| {
        for id in 1..=SEED_AUTHORS {
            tx.execute(
                "INSERT INTO authors (id, full_name) VALUES (?1, ?2);",
                params![id, format!("Author_{id}")],
            )?;
        }
        for id in 1..=SEED_GENRES {
            tx.execute(
                "INSERT INTO genres (id, name) VALUES (?1, ?2);",
                params![id, format!("Genre_{id}")],
            )?;
        }
        for id in 1..=SEED_BOOKS {
            tx.execute(
                "INSERT INTO books (id, title, author_id) VALUES (?1, ?2, ?3);",
                params![id, format!("BookTitle_{id}"), id],
            )?;
            for genre_id in [2 * id - 1, 2 * id] {
                tx.execute(
                    "INSERT INTO books_genres (book_id, genre_id) VALUES (?1, ?2);",
                    params![id, genre_id],
                )?;
            }
            for n in 1..=COMMENTS_PER_BOOK {
                tx.execute(
                    "INSERT INTO comments (comment_content, book_id) VALUES (?1, ?2);",
                    params![format!("Comment_{n}_for_book_{id}"), id],
                )?;
            }
        }
        Ok::<_, DbError>(())
    })?;

    info!(
        "event=db_seed module=db status=ok authors={SEED_AUTHORS} genres={SEED_GENRES} books={SEED_BOOKS}"
    );
    Ok(true)
}
