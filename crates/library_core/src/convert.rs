//! Transfer objects and converters for catalog aggregates.
//!
//! # Responsibility
//! - Flatten persistent aggregates into serializable DTOs for callers.
//! - Map DTOs back into domain values for writes.
//! - Render DTOs as the one-line text used by the CLI.
//!
//! # Invariants
//! - `CommentDto` carries only `book_id`; the book graph is not copied.
//! - Genre order is preserved in both directions.

use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::comment::Comment;
use crate::model::genre::Genre;
use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDto {
    pub id: EntityId,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreDto {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDto {
    pub id: EntityId,
    pub title: String,
    pub author: AuthorDto,
    pub genres: Vec<GenreDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: EntityId,
    pub content: String,
    pub book_id: EntityId,
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            full_name: author.full_name.clone(),
        }
    }
}

impl From<AuthorDto> for Author {
    fn from(dto: AuthorDto) -> Self {
        Author::new(dto.id, dto.full_name)
    }
}

impl From<&Genre> for GenreDto {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
        }
    }
}

impl From<GenreDto> for Genre {
    fn from(dto: GenreDto) -> Self {
        Genre::new(dto.id, dto.name)
    }
}

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: AuthorDto::from(&book.author),
            genres: book.genres.iter().map(GenreDto::from).collect(),
        }
    }
}

impl From<BookDto> for Book {
    fn from(dto: BookDto) -> Self {
        Book::with_id(
            dto.id,
            dto.title,
            dto.author.into(),
            dto.genres.into_iter().map(Genre::from).collect(),
        )
    }
}

impl From<&Comment> for CommentDto {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content.clone(),
            book_id: comment.book.id,
        }
    }
}

impl CommentDto {
    /// Rebuilds the domain comment around an already loaded book.
    ///
    /// `book.id` wins over `self.book_id` when they differ.
    pub fn into_comment(self, book: Book) -> Comment {
        Comment::with_id(self.id, self.content, book)
    }
}

impl Display for AuthorDto {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id: {}, FullName: {}", self.id, self.full_name)
    }
}

impl Display for GenreDto {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id: {}, Name: {}", self.id, self.name)
    }
}

impl Display for BookDto {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let genres = self
            .genres
            .iter()
            .map(|genre| format!("{{{genre}}}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Id: {}, title: {}, author: {{{}}}, genres: [{}]",
            self.id, self.title, self.author, genres
        )
    }
}

impl Display for CommentDto {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Id: {}, for book with Id: {}, content: {}",
            self.id, self.book_id, self.content
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{BookDto, CommentDto, GenreDto};
    use crate::model::author::Author;
    use crate::model::book::Book;
    use crate::model::comment::Comment;
    use crate::model::genre::Genre;

    fn sample_book() -> Book {
        Book::with_id(
            1,
            "BookTitle_1",
            Author::new(1, "Author_1"),
            vec![Genre::new(1, "Genre_1"), Genre::new(2, "Genre_2")],
        )
    }

    #[test]
    fn book_dto_renders_author_and_genres() {
        let dto = BookDto::from(&sample_book());
        assert_eq!(
            dto.to_string(),
            "Id: 1, title: BookTitle_1, author: {Id: 1, FullName: Author_1}, \
             genres: [{Id: 1, Name: Genre_1}, {Id: 2, Name: Genre_2}]"
        );
    }

    #[test]
    fn book_without_genres_renders_empty_list() {
        let book = Book::with_id(4, "Lonely", Author::new(2, "Author_2"), Vec::new());
        let dto = BookDto::from(&book);
        assert!(dto.to_string().ends_with("genres: []"));
    }

    #[test]
    fn book_dto_maps_back_to_domain_keeping_genre_order() {
        let mut dto = BookDto::from(&sample_book());
        dto.genres.reverse();
        let book = Book::from(dto);
        assert_eq!(book.genre_ids(), vec![2, 1]);
        assert_eq!(book.author.full_name, "Author_1");
        assert_eq!(book.title, "BookTitle_1");
    }

    #[test]
    fn comment_dto_keeps_only_book_id() {
        let comment = Comment::with_id(5, "nice", sample_book());
        let dto = CommentDto::from(&comment);
        assert_eq!(dto.book_id, 1);
        assert_eq!(dto.to_string(), "Id: 5, for book with Id: 1, content: nice");

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["book_id"], 1);
        assert!(json.get("book").is_none());
    }

    #[test]
    fn comment_dto_rebuilds_comment_around_loaded_book() {
        let dto = CommentDto {
            id: 9,
            content: "text".to_string(),
            book_id: 1,
        };
        let comment = dto.into_comment(sample_book());
        assert_eq!(comment.id, 9);
        assert_eq!(comment.book.genres.len(), 2);
    }

    #[test]
    fn genre_dto_serializes_with_plain_field_names() {
        let dto = GenreDto::from(&Genre::new(3, "Genre_3"));
        let json = serde_json::to_string(&dto).unwrap();
        assert_eq!(json, r#"{"id":3,"name":"Genre_3"}"#);
    }
}
