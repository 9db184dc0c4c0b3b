mod common;

use common::{comment_count, fixture_author, seeded_db};
use library_core::db::seed::COMMENTS_PER_BOOK;
use library_core::{
    Book, BookRepository, Comment, CommentRepository, RepoError, SqliteBookRepository,
    SqliteCommentRepository,
};

#[test]
fn find_by_id_loads_comment_with_full_book() {
    let conn = seeded_db();
    let repo = SqliteCommentRepository::new(&conn);

    let comment = repo.find_by_id(3).unwrap().unwrap();
    assert_eq!(comment.content, "Comment_1_for_book_2");
    assert_eq!(comment.book.id, 2);
    assert_eq!(comment.book.title, "BookTitle_2");
    assert_eq!(comment.book.author.full_name, "Author_2");
    assert_eq!(comment.book.genre_ids(), vec![3, 4]);
}

#[test]
fn find_by_id_returns_none_for_unknown_id() {
    let conn = seeded_db();
    assert!(SqliteCommentRepository::new(&conn)
        .find_by_id(500)
        .unwrap()
        .is_none());
}

#[test]
fn comments_by_book_are_ordered_and_each_has_complete_genres() {
    let conn = seeded_db();
    let repo = SqliteCommentRepository::new(&conn);

    let comments = repo.find_all_by_book_id(1).unwrap();
    assert_eq!(comments.len() as i64, COMMENTS_PER_BOOK);
    let ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2]);
    for comment in &comments {
        assert_eq!(comment.book.id, 1);
        // Genre rows are repeated per comment; each comment gets both once.
        assert_eq!(comment.book.genre_ids(), vec![1, 2]);
    }
}

#[test]
fn comments_of_book_without_genres_have_empty_genre_list() {
    let conn = seeded_db();
    let book = SqliteBookRepository::new(&conn)
        .save(Book::new("Bare", fixture_author(3), Vec::new()))
        .unwrap();
    let repo = SqliteCommentRepository::new(&conn);
    repo.save(Comment::new("first", book.clone())).unwrap();
    repo.save(Comment::new("second", book.clone())).unwrap();

    let comments = repo.find_all_by_book_id(book.id).unwrap();
    assert_eq!(comments.len(), 2);
    assert!(comments.iter().all(|c| c.book.genres.is_empty()));
}

#[test]
fn find_all_lists_every_comment_in_id_order() {
    let conn = seeded_db();
    let comments = SqliteCommentRepository::new(&conn).find_all().unwrap();
    let ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
    assert_eq!(ids, (1..=6).collect::<Vec<_>>());
}

#[test]
fn insert_and_update_comment() {
    let conn = seeded_db();
    let book = SqliteBookRepository::new(&conn)
        .find_by_id(3)
        .unwrap()
        .unwrap();
    let repo = SqliteCommentRepository::new(&conn);

    let mut saved = repo.save(Comment::new("draft", book)).unwrap();
    assert!(saved.id > 6);

    saved.content = "final".to_string();
    repo.save(saved.clone()).unwrap();

    let loaded = repo.find_by_id(saved.id).unwrap().unwrap();
    assert_eq!(loaded.content, "final");
    assert_eq!(loaded.book.id, 3);
    assert_eq!(comment_count(&conn, 3), COMMENTS_PER_BOOK + 1);
}

#[test]
fn update_of_unknown_comment_fails() {
    let conn = seeded_db();
    let book = SqliteBookRepository::new(&conn)
        .find_by_id(1)
        .unwrap()
        .unwrap();

    let err = SqliteCommentRepository::new(&conn)
        .save(Comment::with_id(404, "nobody", book))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "comment", id: 404 }));
}

#[test]
fn delete_comment_is_idempotent() {
    let conn = seeded_db();
    let repo = SqliteCommentRepository::new(&conn);

    repo.delete_by_id(1).unwrap();
    repo.delete_by_id(1).unwrap();
    assert!(repo.find_by_id(1).unwrap().is_none());
    assert_eq!(comment_count(&conn, 1), COMMENTS_PER_BOOK - 1);
}

#[test]
fn deleting_book_leaves_no_comments_for_it() {
    let conn = seeded_db();
    SqliteBookRepository::new(&conn).delete_by_id(2).unwrap();

    let repo = SqliteCommentRepository::new(&conn);
    assert!(repo.find_all_by_book_id(2).unwrap().is_empty());
    assert_eq!(comment_count(&conn, 2), 0);
    assert_eq!(repo.find_all().unwrap().len() as i64, 2 * COMMENTS_PER_BOOK);
}
