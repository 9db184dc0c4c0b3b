#![allow(dead_code)]

use library_core::db::open_db_in_memory;
use library_core::db::seed::seed_demo_data;
use library_core::{Author, Genre};
use rusqlite::Connection;

/// In-memory catalog loaded with the reference fixture.
pub fn seeded_db() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    assert!(seed_demo_data(&mut conn).unwrap());
    conn
}

pub fn fixture_author(id: i64) -> Author {
    Author::new(id, format!("Author_{id}"))
}

pub fn fixture_genre(id: i64) -> Genre {
    Genre::new(id, format!("Genre_{id}"))
}

pub fn count(conn: &Connection, sql: &str, id: i64) -> i64 {
    conn.query_row(sql, [id], |row| row.get(0)).unwrap()
}

pub fn link_count(conn: &Connection, book_id: i64) -> i64 {
    count(
        conn,
        "SELECT COUNT(*) FROM books_genres WHERE book_id = ?1;",
        book_id,
    )
}

pub fn comment_count(conn: &Connection, book_id: i64) -> i64 {
    count(
        conn,
        "SELECT COUNT(*) FROM comments WHERE book_id = ?1;",
        book_id,
    )
}
