use library_core::db::migrations::{latest_version, schema_version};
use library_core::db::seed::{seed_demo_data, SEED_AUTHORS, SEED_BOOKS};
use library_core::db::{open_db, open_db_in_memory, DbError};
use library_core::{BookService, BookWrite};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    for table in ["authors", "genres", "books", "books_genres", "comments"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn foreign_keys_are_enforced() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let err = conn
        .execute(
            "INSERT INTO books (title, author_id) VALUES ('orphan', 42);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn reopening_file_database_keeps_schema_and_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.sqlite3");

    let mut first = open_db(&path).unwrap();
    assert!(seed_demo_data(&mut first).unwrap());
    drop(first);

    let mut second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second).unwrap(), latest_version());
    assert!(!seed_demo_data(&mut second).unwrap());
    let books: i64 = second
        .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(books, SEED_BOOKS);
}

#[test]
fn seeding_again_after_all_books_were_deleted_skips_without_error() {
    let mut conn = open_db_in_memory().unwrap();
    assert!(seed_demo_data(&mut conn).unwrap());
    {
        let mut service = BookService::new(&mut conn);
        for id in 1..=SEED_BOOKS {
            service.delete_by_id(id).unwrap();
        }
        assert!(service.find_all().unwrap().is_empty());
    }

    assert!(!seed_demo_data(&mut conn).unwrap());
    let authors: i64 = conn
        .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(authors, SEED_AUTHORS);

    // The catalog stays usable with the surviving reference rows.
    let created = BookService::new(&mut conn)
        .insert(&BookWrite::new("After reseed", 1, vec![2]))
        .unwrap();
    assert_eq!(created.author.full_name, "Author_1");
}

#[test]
fn seeding_skips_when_only_reference_rows_exist() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO genres (name) VALUES ('Poetry');", [])
        .unwrap();

    assert!(!seed_demo_data(&mut conn).unwrap());
    let books: i64 = conn
        .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(books, 0);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
