//! Read-only services for the author and genre lookup tables.

use crate::convert::{AuthorDto, GenreDto};
use crate::repo::author_repo::AuthorRepository;
use crate::repo::genre_repo::GenreRepository;
use crate::service::ServiceResult;

/// Use-case wrapper over an author repository.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all authors ordered by id.
    pub fn find_all(&self) -> ServiceResult<Vec<AuthorDto>> {
        let authors = self.repo.find_all()?;
        Ok(authors.iter().map(AuthorDto::from).collect())
    }
}

/// Use-case wrapper over a genre repository.
pub struct GenreService<R: GenreRepository> {
    repo: R,
}

impl<R: GenreRepository> GenreService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all genres ordered by id.
    pub fn find_all(&self) -> ServiceResult<Vec<GenreDto>> {
        let genres = self.repo.find_all()?;
        Ok(genres.iter().map(GenreDto::from).collect())
    }
}
