//! Library domain model.
//!
//! # Responsibility
//! - Define the `Author` and `Book` records read by the query services.
//! - Own the record-level invariants both storage backends enforce.
//!
//! # Invariants
//! - Ids are stable, unique and totally ordered.
//! - Book -> Author is many-to-one; the reverse view is derived, never stored.

pub mod author;
pub mod book;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Violation of a model invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    EmptyTitle(book::BookId),
    NulInTitle(book::BookId),
    NegativePrice(book::BookId),
    NegativeQuantity(book::BookId),
    DuplicateAuthorId(author::AuthorId),
    DuplicateBookId(book::BookId),
    /// Book references an author that does not exist.
    MissingAuthor {
        book_id: book::BookId,
        author_id: author::AuthorId,
    },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle(id) => write!(f, "book {id} has an empty title"),
            Self::NulInTitle(id) => write!(f, "book {id} has a NUL character in its title"),
            Self::NegativePrice(id) => write!(f, "book {id} has a negative price"),
            Self::NegativeQuantity(id) => {
                write!(f, "book {id} has a negative published quantity")
            }
            Self::DuplicateAuthorId(id) => write!(f, "duplicate author id {id}"),
            Self::DuplicateBookId(id) => write!(f, "duplicate book id {id}"),
            Self::MissingAuthor { book_id, author_id } => {
                write!(f, "book {book_id} references missing author {author_id}")
            }
        }
    }
}

impl Error for ModelValidationError {}
