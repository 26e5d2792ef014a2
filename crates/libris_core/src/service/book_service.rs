//! Book query service.
//!
//! # Invariants
//! - `get_book` ties on published cost resolve to the smallest book id.
//! - `get_books` title matching is case-sensitive.

use crate::model::book::Book;
use crate::repo::library_repo::{BookListQuery, BookOrder, LibraryRepository, RepoResult};
use chrono::NaiveDate;
use log::debug;
use std::time::Instant;

/// Literal title fragment selected by [`BookService::get_books`].
pub const RED_TITLE_KEYWORD: &str = "Red";

/// Release date of Sabaton's "Carolus Rex" (2012-05-25).
pub fn carolus_rex_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2012, 5, 25).expect("valid calendar date")
}

/// Use-case service answering book questions.
pub struct BookService<R: LibraryRepository> {
    repo: R,
}

impl<R: LibraryRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the book with the highest `price * quantity_published`.
    ///
    /// Returns `Ok(None)` when there are no books.
    pub fn get_book(&self) -> RepoResult<Option<Book>> {
        let started_at = Instant::now();
        let query = BookListQuery {
            order: BookOrder::PublishedCostDesc,
            limit: Some(1),
            ..BookListQuery::default()
        };
        let book = self.repo.list_books(&query)?.into_iter().next();

        debug!(
            "event=book_query module=service query=max_published_cost status=ok found={} duration_ms={}",
            book.is_some(),
            started_at.elapsed().as_millis()
        );
        Ok(book)
    }

    /// Returns books titled with [`RED_TITLE_KEYWORD`] and published after
    /// [`carolus_rex_release_date`], ordered by id.
    pub fn get_books(&self) -> RepoResult<Vec<Book>> {
        let started_at = Instant::now();
        let query = BookListQuery {
            title_contains: Some(RED_TITLE_KEYWORD.to_string()),
            published_after: Some(carolus_rex_release_date()),
            ..BookListQuery::default()
        };
        let books = self.repo.list_books(&query)?;

        debug!(
            "event=book_query module=service query=red_after_carolus_rex status=ok count={} duration_ms={}",
            books.len(),
            started_at.elapsed().as_millis()
        );
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::carolus_rex_release_date;

    #[test]
    fn carolus_rex_release_date_is_fixed() {
        assert_eq!(carolus_rex_release_date().to_string(), "2012-05-25");
    }
}
