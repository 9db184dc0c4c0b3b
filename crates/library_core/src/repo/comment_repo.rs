//! Comment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load comments together with their full book (author and genres).
//! - Persist comment rows.
//!
//! # Invariants
//! - Every loaded comment carries a resolved book; the join is INNER on
//!   `books` and `authors`, LEFT on the genre bridge.
//! - Lists are ordered by `comments.id ASC`.

use crate::model::comment::Comment;
use crate::model::{EntityId, Identified};
use crate::repo::aggregate::RelationAggregator;
use crate::repo::row_mapper::{map_book_genre, map_book_head};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Params, Row};

const COMMENT_JOIN_SQL: &str = "SELECT
    c.id AS comment_id,
    c.comment_content AS comment_content,
    b.id AS book_id,
    b.title AS book_title,
    a.id AS author_id,
    a.full_name AS author_full_name,
    g.id AS genre_id,
    g.name AS genre_name
FROM comments c
    INNER JOIN books b ON b.id = c.book_id
    INNER JOIN authors a ON a.id = b.author_id
    LEFT JOIN books_genres bg ON bg.book_id = b.id
    LEFT JOIN genres g ON g.id = bg.genre_id";

const COMMENT_JOIN_ORDER_SQL: &str = "ORDER BY c.id ASC, bg.rowid ASC";

/// Repository interface for the comment aggregate.
pub trait CommentRepository {
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Comment>>;
    fn find_all(&self) -> RepoResult<Vec<Comment>>;
    fn find_all_by_book_id(&self, book_id: EntityId) -> RepoResult<Vec<Comment>>;
    /// Inserts a transient comment or updates content/book of an existing one.
    fn save(&self, comment: Comment) -> RepoResult<Comment>;
    /// Deletes one comment. Absent ids are a no-op.
    fn delete_by_id(&self, id: EntityId) -> RepoResult<()>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_comments<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut comments = RelationAggregator::new();
        while let Some(row) = rows.next()? {
            let comment_id: EntityId = row.get("comment_id")?;
            let genre = map_book_genre(row)?;
            comments.push_row(comment_id, || map_comment_head(row), genre)?;
        }
        Ok(comments.finish())
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Comment>> {
        let sql = format!("{COMMENT_JOIN_SQL} WHERE c.id = ?1 {COMMENT_JOIN_ORDER_SQL};");
        Ok(self.query_comments(&sql, [id])?.into_iter().next())
    }

    fn find_all(&self) -> RepoResult<Vec<Comment>> {
        let sql = format!("{COMMENT_JOIN_SQL} {COMMENT_JOIN_ORDER_SQL};");
        self.query_comments(&sql, [])
    }

    fn find_all_by_book_id(&self, book_id: EntityId) -> RepoResult<Vec<Comment>> {
        let sql = format!("{COMMENT_JOIN_SQL} WHERE c.book_id = ?1 {COMMENT_JOIN_ORDER_SQL};");
        self.query_comments(&sql, [book_id])
    }

    fn save(&self, mut comment: Comment) -> RepoResult<Comment> {
        if comment.is_transient() {
            self.conn.execute(
                "INSERT INTO comments (comment_content, book_id) VALUES (?1, ?2);",
                params![comment.content.as_str(), comment.book.id],
            )?;
            comment.id = self.conn.last_insert_rowid();
            return Ok(comment);
        }

        let changed = self.conn.execute(
            "UPDATE comments SET comment_content = ?1, book_id = ?2 WHERE id = ?3;",
            params![comment.content.as_str(), comment.book.id, comment.id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "comment",
                id: comment.id,
            });
        }
        Ok(comment)
    }

    fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM comments WHERE id = ?1;", [id])?;
        Ok(())
    }
}

fn map_comment_head(row: &Row<'_>) -> RepoResult<Comment> {
    Ok(Comment::with_id(
        row.get("comment_id")?,
        row.get::<_, String>("comment_content")?,
        map_book_head(row)?,
    ))
}
