//! Comment use-case service.
//!
//! # Invariants
//! - A comment can only be created for an existing book.
//! - `update` changes content only; the owning book is kept.

use crate::convert::CommentDto;
use crate::db::with_transaction;
use crate::model::comment::Comment;
use crate::model::EntityId;
use crate::repo::book_repo::{BookRepository, SqliteBookRepository};
use crate::repo::comment_repo::{CommentRepository, SqliteCommentRepository};
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};
use rusqlite::Connection;

/// Comment use-cases over one catalog connection.
pub struct CommentService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> CommentService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    pub fn find_by_id(&self, id: EntityId) -> ServiceResult<Option<CommentDto>> {
        let comment = SqliteCommentRepository::new(self.conn).find_by_id(id)?;
        Ok(comment.as_ref().map(CommentDto::from))
    }

    /// Lists the comments of one book ordered by id. Unknown books yield
    /// an empty list.
    pub fn find_all_by_book_id(&self, book_id: EntityId) -> ServiceResult<Vec<CommentDto>> {
        let comments = SqliteCommentRepository::new(self.conn).find_all_by_book_id(book_id)?;
        Ok(comments.iter().map(CommentDto::from).collect())
    }

    /// Adds a comment to book `book_id`.
    pub fn insert(&mut self, content: &str, book_id: EntityId) -> ServiceResult<CommentDto> {
        let result = with_transaction(self.conn, |tx| {
            let book = SqliteBookRepository::new(tx)
                .find_by_id(book_id)?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("book with id {book_id} not found"))
                })?;
            Ok::<_, ServiceError>(SqliteCommentRepository::new(tx).save(Comment::new(content, book))?)
        });
        log_write("comment_insert", result.as_ref().map(|comment| comment.id));
        Ok(CommentDto::from(&result?))
    }

    /// Replaces the content of comment `id`.
    pub fn update(&mut self, id: EntityId, content: &str) -> ServiceResult<CommentDto> {
        let result = with_transaction(self.conn, |tx| {
            let repo = SqliteCommentRepository::new(tx);
            let mut comment = repo.find_by_id(id)?.ok_or_else(|| {
                ServiceError::NotFound(format!("comment with id {id} not found"))
            })?;
            comment.content = content.to_string();
            Ok::<_, ServiceError>(repo.save(comment)?)
        });
        log_write("comment_update", result.as_ref().map(|comment| comment.id));
        Ok(CommentDto::from(&result?))
    }

    /// Deletes one comment. Deleting an absent id succeeds.
    pub fn delete_by_id(&mut self, id: EntityId) -> ServiceResult<()> {
        let result = with_transaction(self.conn, |tx| {
            SqliteCommentRepository::new(tx).delete_by_id(id)?;
            Ok::<_, ServiceError>(id)
        });
        log_write("comment_delete", result.as_ref().copied());
        result.map(|_| ())
    }
}

fn log_write(event: &str, result: Result<EntityId, &ServiceError>) {
    match result {
        Ok(comment_id) => {
            info!("event={event} module=service status=ok comment_id={comment_id}")
        }
        Err(err) => warn!(
            "event={event} module=service status=error error_code={} error={err}",
            err.code()
        ),
    }
}
