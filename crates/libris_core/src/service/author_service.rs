//! Author query service.
//!
//! # Invariants
//! - `get_author` ties on title length resolve to the smallest author id.
//! - `get_authors` only considers authors with at least one book published
//!   after [`RECENT_YEAR_CUTOFF`].

use crate::model::author::Author;
use crate::repo::library_repo::{AuthorListQuery, BookListQuery, LibraryRepository, RepoResult};
use log::debug;
use std::time::Instant;

/// Books count as recent when published in a later year than this.
pub const RECENT_YEAR_CUTOFF: i32 = 2015;

/// Use-case service answering author questions.
pub struct AuthorService<R: LibraryRepository> {
    repo: R,
}

impl<R: LibraryRepository> AuthorService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the author of the book with the longest title.
    ///
    /// Returns `Ok(None)` when there are no books at all.
    pub fn get_author(&self) -> RepoResult<Option<Author>> {
        let started_at = Instant::now();
        let Some(max_length) = self.repo.max_title_length()? else {
            debug!(
                "event=author_query module=service query=longest_title status=ok found=false duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return Ok(None);
        };

        let query = AuthorListQuery {
            with_title_length: Some(max_length),
            limit: Some(1),
            ..AuthorListQuery::default()
        };
        let author = self.repo.list_authors(&query)?.into_iter().next();

        debug!(
            "event=author_query module=service query=longest_title status=ok found={} max_length={} duration_ms={}",
            author.is_some(),
            max_length,
            started_at.elapsed().as_millis()
        );
        Ok(author)
    }

    /// Returns authors with an even, non-zero number of books published after
    /// [`RECENT_YEAR_CUTOFF`], ordered by id.
    pub fn get_authors(&self) -> RepoResult<Vec<Author>> {
        let started_at = Instant::now();
        let recent = BookListQuery {
            published_after_year: Some(RECENT_YEAR_CUTOFF),
            ..BookListQuery::default()
        };

        let authors = self.repo.list_authors(&AuthorListQuery {
            with_even_book_count: Some(recent),
            ..AuthorListQuery::default()
        })?;

        debug!(
            "event=author_query module=service query=even_recent_count status=ok count={} duration_ms={}",
            authors.len(),
            started_at.elapsed().as_millis()
        );
        Ok(authors)
    }
}
