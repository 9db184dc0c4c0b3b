//! Row-to-entity mapping for catalog queries.
//!
//! Column names are passed in by the caller so the same mapper serves plain
//! lookups (`id`, `name`) and aliased join projections (`genre_id`, ...).

use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::genre::Genre;
use crate::repo::{RepoError, RepoResult};
use rusqlite::Row;

/// Column aliases of the book head projection shared by book/comment joins.
pub const BOOK_ID_COLUMN: &str = "book_id";
pub const BOOK_TITLE_COLUMN: &str = "book_title";
pub const AUTHOR_ID_COLUMN: &str = "author_id";
pub const AUTHOR_NAME_COLUMN: &str = "author_full_name";
pub const GENRE_ID_COLUMN: &str = "genre_id";
pub const GENRE_NAME_COLUMN: &str = "genre_name";

pub fn map_author(row: &Row<'_>, id_column: &str, name_column: &str) -> RepoResult<Author> {
    Ok(Author::new(row.get(id_column)?, row.get::<_, String>(name_column)?))
}

pub fn map_genre(row: &Row<'_>, id_column: &str, name_column: &str) -> RepoResult<Genre> {
    Ok(Genre::new(row.get(id_column)?, row.get::<_, String>(name_column)?))
}

/// Maps the genre side of an outer join.
///
/// Returns `None` when the join produced no genre (NULL-extended row).
pub fn map_optional_genre(
    row: &Row<'_>,
    id_column: &str,
    name_column: &str,
) -> RepoResult<Option<Genre>> {
    let Some(id) = row.get::<_, Option<i64>>(id_column)? else {
        return Ok(None);
    };
    let name = row
        .get::<_, Option<String>>(name_column)?
        .ok_or_else(|| {
            RepoError::InvalidData(format!("genre {id} has NULL `{name_column}` in join row"))
        })?;
    Ok(Some(Genre::new(id, name)))
}

/// Maps the book columns of a join row. Genres start empty; the relation
/// aggregator fills them.
pub fn map_book_head(row: &Row<'_>) -> RepoResult<Book> {
    let author = map_author(row, AUTHOR_ID_COLUMN, AUTHOR_NAME_COLUMN)?;
    Ok(Book::with_id(
        row.get(BOOK_ID_COLUMN)?,
        row.get::<_, String>(BOOK_TITLE_COLUMN)?,
        author,
        Vec::new(),
    ))
}

/// Maps the genre side of a book join row.
pub fn map_book_genre(row: &Row<'_>) -> RepoResult<Option<Genre>> {
    map_optional_genre(row, GENRE_ID_COLUMN, GENRE_NAME_COLUMN)
}
