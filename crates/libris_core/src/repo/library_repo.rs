//! Library repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Expose read-only filter/aggregate access to `authors` and `books`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - No method mutates storage.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Author results are ordered by ascending id.

use crate::db::migrations::ensure_schema_ready;
use crate::db::DbError;
use crate::model::author::{Author, AuthorId};
use crate::model::book::Book;
use crate::model::ModelValidationError;
use chrono::{Datelike, NaiveDate};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    publish_date,
    price_cents,
    quantity_published,
    author_id
FROM books";

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    surname
FROM authors";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for library read queries.
#[derive(Debug)]
pub enum RepoError {
    /// Backing store is unreachable or failed the query.
    StorageUnavailable(DbError),
    Validation(ModelValidationError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted library data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::StorageUnavailable(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StorageUnavailable(DbError::Sqlite(value))
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Filter options for listing authors. Results are ordered by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorListQuery {
    /// Keep authors with at least one book of exactly this title length.
    pub with_title_length: Option<usize>,
    /// Keep authors whose number of books matching this query is even and
    /// non-zero. Order and limit of the inner query are ignored.
    pub with_even_book_count: Option<BookListQuery>,
    pub limit: Option<u32>,
}

/// Sort order for book listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookOrder {
    #[default]
    IdAsc,
    /// `price * quantity_published` descending, then id ascending.
    PublishedCostDesc,
}

/// Filter options for listing and grouping books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookListQuery {
    /// Case-sensitive literal substring of the title.
    pub title_contains: Option<String>,
    /// Strictly later than this date.
    pub published_after: Option<NaiveDate>,
    /// Publish year strictly greater than this year.
    pub published_after_year: Option<i32>,
    pub order: BookOrder,
    pub limit: Option<u32>,
}

impl BookListQuery {
    /// Returns whether `book` passes the filters. Order and limit are ignored.
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(needle) = self.title_contains.as_deref() {
            if !book.title.contains(needle) {
                return false;
            }
        }
        if self
            .published_after
            .is_some_and(|date| book.publish_date <= date)
        {
            return false;
        }
        if self
            .published_after_year
            .is_some_and(|year| book.publish_date.year() <= year)
        {
            return false;
        }
        true
    }
}

/// One `GROUP BY author_id` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorBookCount {
    pub author_id: AuthorId,
    /// Always at least 1.
    pub book_count: u64,
}

/// Read-only query interface over persisted authors and books.
pub trait LibraryRepository {
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>>;
    fn list_books(&self, query: &BookListQuery) -> RepoResult<Vec<Book>>;
    /// Longest title length in characters, `None` when there are no books.
    fn max_title_length(&self) -> RepoResult<Option<usize>>;
    /// Groups filtered books by author. Only non-empty groups are returned,
    /// ordered by author id. `order` and `limit` of `query` are ignored.
    fn count_books_by_author(&self, query: &BookListQuery) -> RepoResult<Vec<AuthorBookCount>>;
}

impl<R: LibraryRepository + ?Sized> LibraryRepository for &R {
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        (**self).list_authors(query)
    }

    fn list_books(&self, query: &BookListQuery) -> RepoResult<Vec<Book>> {
        (**self).list_books(query)
    }

    fn max_title_length(&self) -> RepoResult<Option<usize>> {
        (**self).max_title_length()
    }

    fn count_books_by_author(&self, query: &BookListQuery) -> RepoResult<Vec<AuthorBookCount>> {
        (**self).count_books_by_author(query)
    }
}

/// SQLite-backed library repository.
pub struct SqliteLibraryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLibraryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `StorageUnavailable` when the schema is missing or newer than supported.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl LibraryRepository for SqliteLibraryRepository<'_> {
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        let mut sql = format!("{AUTHOR_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(length) = query.with_title_length {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1
                    FROM books
                    WHERE books.author_id = authors.id
                      AND length(books.title) = ?
                )",
            );
            bind_values.push(Value::Integer(length_to_db(length)?));
        }

        if let Some(books) = query.with_even_book_count.as_ref() {
            sql.push_str(
                " AND id IN (
                    SELECT author_id
                    FROM books
                    WHERE 1 = 1",
            );
            push_book_filters(&mut sql, &mut bind_values, books);
            sql.push_str(" GROUP BY author_id HAVING COUNT(*) % 2 = 0)");
        }

        sql.push_str(" ORDER BY id ASC");
        push_limit(&mut sql, &mut bind_values, query.limit);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn list_books(&self, query: &BookListQuery) -> RepoResult<Vec<Book>> {
        let mut sql = format!("{BOOK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        push_book_filters(&mut sql, &mut bind_values, query);

        match query.order {
            BookOrder::IdAsc => sql.push_str(" ORDER BY id ASC"),
            BookOrder::PublishedCostDesc => {
                sql.push_str(" ORDER BY price_cents * quantity_published DESC, id ASC")
            }
        }
        push_limit(&mut sql, &mut bind_values, query.limit);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn max_title_length(&self) -> RepoResult<Option<usize>> {
        let max: Option<i64> =
            self.conn
                .query_row("SELECT MAX(length(title)) FROM books;", [], |row| row.get(0))?;

        max.map(|value| {
            usize::try_from(value).map_err(|_| {
                RepoError::InvalidData(format!("invalid title length `{value}` in books.title"))
            })
        })
        .transpose()
    }

    fn count_books_by_author(&self, query: &BookListQuery) -> RepoResult<Vec<AuthorBookCount>> {
        let mut sql = String::from(
            "SELECT
                author_id,
                COUNT(*) AS book_count
             FROM books
             WHERE 1 = 1",
        );
        let mut bind_values: Vec<Value> = Vec::new();
        push_book_filters(&mut sql, &mut bind_values, query);
        sql.push_str(" GROUP BY author_id ORDER BY author_id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut groups = Vec::new();
        while let Some(row) = rows.next()? {
            let count: i64 = row.get("book_count")?;
            let book_count = u64::try_from(count).map_err(|_| {
                RepoError::InvalidData(format!("invalid group count `{count}` for books"))
            })?;
            groups.push(AuthorBookCount {
                author_id: row.get("author_id")?,
                book_count,
            });
        }

        Ok(groups)
    }
}

fn push_book_filters(sql: &mut String, bind_values: &mut Vec<Value>, query: &BookListQuery) {
    if let Some(needle) = query.title_contains.as_ref() {
        // instr() is case-sensitive, LIKE is not.
        sql.push_str(" AND instr(title, ?) > 0");
        bind_values.push(Value::Text(needle.clone()));
    }
    if let Some(date) = query.published_after {
        sql.push_str(" AND publish_date > ?");
        bind_values.push(Value::Text(date.format(DATE_FORMAT).to_string()));
    }
    if let Some(year) = query.published_after_year {
        sql.push_str(" AND CAST(strftime('%Y', publish_date) AS INTEGER) > ?");
        bind_values.push(Value::Integer(i64::from(year)));
    }
}

fn push_limit(sql: &mut String, bind_values: &mut Vec<Value>, limit: Option<u32>) {
    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
    }
}

fn length_to_db(length: usize) -> RepoResult<i64> {
    i64::try_from(length)
        .map_err(|_| RepoError::InvalidData(format!("title length `{length}` out of range")))
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    Ok(Author {
        id: row.get("id")?,
        name: row.get("name")?,
        surname: row.get("surname")?,
    })
}

/// Parses `YYYY-MM-DD` only. Unpadded forms such as `2012-5-3` are rejected
/// because SQL filters compare the stored text directly.
fn parse_canonical_date(text: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == text).then_some(date)
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let date_text: String = row.get("publish_date")?;
    let publish_date = parse_canonical_date(&date_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in books.publish_date"
        ))
    })?;

    let book = Book {
        id: row.get("id")?,
        title: row.get("title")?,
        publish_date,
        price_cents: row.get("price_cents")?,
        quantity_published: row.get("quantity_published")?,
        author_id: row.get("author_id")?,
    };
    book.validate()?;
    Ok(book)
}
