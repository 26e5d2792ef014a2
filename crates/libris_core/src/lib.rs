//! Read-only query core for the Libris author/book catalogue.
//! Services answer fixed questions about authors and books over any
//! `LibraryRepository` backend.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::author::{Author, AuthorId};
pub use model::book::{Book, BookId};
pub use model::ModelValidationError;
pub use repo::library_repo::{
    AuthorBookCount, AuthorListQuery, BookListQuery, BookOrder, LibraryRepository, RepoError,
    RepoResult, SqliteLibraryRepository,
};
pub use repo::memory_repo::MemoryLibraryRepository;
pub use service::author_service::{AuthorService, RECENT_YEAR_CUTOFF};
pub use service::book_service::{carolus_rex_release_date, BookService, RED_TITLE_KEYWORD};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
