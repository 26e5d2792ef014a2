//! In-memory library repository.
//!
//! # Invariants
//! - The dataset is immutable after construction, so any number of readers
//!   can share one instance without locking.
//! - Every book references an author present in the same dataset.

use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookId};
use crate::model::ModelValidationError;
use crate::repo::library_repo::{
    AuthorBookCount, AuthorListQuery, BookListQuery, BookOrder, LibraryRepository, RepoResult,
};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

/// Read-only snapshot of authors and books keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryLibraryRepository {
    authors: BTreeMap<AuthorId, Author>,
    books: BTreeMap<BookId, Book>,
}

impl MemoryLibraryRepository {
    /// Builds a snapshot after checking ids, book invariants and author links.
    ///
    /// # Errors
    /// - `Validation` on duplicate ids, invalid books, or dangling `author_id`.
    pub fn try_new(
        authors: impl IntoIterator<Item = Author>,
        books: impl IntoIterator<Item = Book>,
    ) -> RepoResult<Self> {
        let mut author_map = BTreeMap::new();
        for author in authors {
            let id = author.id;
            if author_map.insert(id, author).is_some() {
                return Err(ModelValidationError::DuplicateAuthorId(id).into());
            }
        }

        let mut book_map = BTreeMap::new();
        for book in books {
            book.validate()?;
            if !author_map.contains_key(&book.author_id) {
                return Err(ModelValidationError::MissingAuthor {
                    book_id: book.id,
                    author_id: book.author_id,
                }
                .into());
            }
            let id = book.id;
            if book_map.insert(id, book).is_some() {
                return Err(ModelValidationError::DuplicateBookId(id).into());
            }
        }

        Ok(Self {
            authors: author_map,
            books: book_map,
        })
    }

    fn book_counts(&self, query: &BookListQuery) -> BTreeMap<AuthorId, u64> {
        let mut counts = BTreeMap::new();
        for book in self.books.values().filter(|book| query.matches(book)) {
            *counts.entry(book.author_id).or_default() += 1;
        }
        counts
    }
}

impl LibraryRepository for MemoryLibraryRepository {
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        let with_title_length: Option<BTreeSet<AuthorId>> = query.with_title_length.map(|length| {
            self.books
                .values()
                .filter(|book| book.title_len() == length)
                .map(|book| book.author_id)
                .collect()
        });
        let with_even_count: Option<BTreeSet<AuthorId>> =
            query.with_even_book_count.as_ref().map(|books| {
                self.book_counts(books)
                    .into_iter()
                    .filter(|(_, count)| count % 2 == 0)
                    .map(|(author_id, _)| author_id)
                    .collect()
            });

        let keep = |id: &AuthorId, set: &Option<BTreeSet<AuthorId>>| {
            set.as_ref().map_or(true, |ids| ids.contains(id))
        };
        let matched = self
            .authors
            .values()
            .filter(|author| {
                keep(&author.id, &with_title_length) && keep(&author.id, &with_even_count)
            })
            .cloned();

        Ok(apply_limit(matched, query.limit))
    }

    fn list_books(&self, query: &BookListQuery) -> RepoResult<Vec<Book>> {
        let mut matched: Vec<&Book> = self
            .books
            .values()
            .filter(|book| query.matches(book))
            .collect();

        if query.order == BookOrder::PublishedCostDesc {
            // Stable sort keeps ascending id among equal costs.
            matched.sort_by_key(|book| Reverse(book.published_cost()));
        }

        Ok(apply_limit(matched.into_iter().cloned(), query.limit))
    }

    fn max_title_length(&self) -> RepoResult<Option<usize>> {
        Ok(self.books.values().map(Book::title_len).max())
    }

    fn count_books_by_author(&self, query: &BookListQuery) -> RepoResult<Vec<AuthorBookCount>> {
        Ok(self
            .book_counts(query)
            .into_iter()
            .map(|(author_id, book_count)| AuthorBookCount {
                author_id,
                book_count,
            })
            .collect())
    }
}

fn apply_limit<T>(items: impl Iterator<Item = T>, limit: Option<u32>) -> Vec<T> {
    match limit {
        Some(limit) => items
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect(),
        None => items.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryLibraryRepository;
    use crate::model::author::Author;
    use crate::model::book::Book;
    use crate::model::ModelValidationError;
    use crate::repo::library_repo::{
        AuthorListQuery, BookListQuery, LibraryRepository, RepoError,
    };
    use chrono::NaiveDate;

    fn book(id: i64, author_id: i64) -> Book {
        Book {
            id,
            title: format!("Book {id}"),
            publish_date: NaiveDate::from_ymd_opt(2018, 3, 1).unwrap(),
            price_cents: 500,
            quantity_published: 10,
            author_id,
        }
    }

    #[test]
    fn try_new_rejects_dangling_author_reference() {
        let err = MemoryLibraryRepository::try_new(vec![Author::new(1, "A", "B")], vec![book(1, 2)])
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ModelValidationError::MissingAuthor {
                book_id: 1,
                author_id: 2
            })
        ));
    }

    #[test]
    fn try_new_rejects_duplicate_ids() {
        let err = MemoryLibraryRepository::try_new(
            vec![Author::new(1, "A", "B"), Author::new(1, "C", "D")],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ModelValidationError::DuplicateAuthorId(1))
        ));

        let err = MemoryLibraryRepository::try_new(
            vec![Author::new(1, "A", "B")],
            vec![book(3, 1), book(3, 1)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ModelValidationError::DuplicateBookId(3))
        ));
    }

    #[test]
    fn repository_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryLibraryRepository>();
    }

    #[test]
    fn list_authors_combines_title_length_and_even_count_filters() {
        let authors = (1..=3).map(|id| Author::new(id, "N", "S"));
        // Titles are "Book 1".."Book 5"; author 3 has a single book.
        let books = vec![book(1, 1), book(2, 1), book(3, 2), book(4, 2), book(5, 3)];
        let repo = MemoryLibraryRepository::try_new(authors, books).unwrap();

        let even = repo
            .list_authors(&AuthorListQuery {
                with_even_book_count: Some(BookListQuery::default()),
                ..AuthorListQuery::default()
            })
            .unwrap();
        assert_eq!(even.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2]);

        let even_limited = repo
            .list_authors(&AuthorListQuery {
                with_title_length: Some(6),
                with_even_book_count: Some(BookListQuery::default()),
                limit: Some(1),
            })
            .unwrap();
        assert_eq!(even_limited.len(), 1);
        assert_eq!(even_limited[0].id, 1);
    }
}
