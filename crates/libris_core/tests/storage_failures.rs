mod common;

use common::{author, book, date, seed};
use libris_core::db::migrations::latest_version;
use libris_core::db::{open_db_in_memory, DbError};
use libris_core::{AuthorService, BookService, RepoError, SqliteLibraryRepository};
use rusqlite::Connection;

#[test]
fn storage_failure_propagates_through_services() {
    let conn = open_db_in_memory().unwrap();
    seed(
        &conn,
        &[author(1)],
        &[book(1, 1, "Red Storm", date(2020, 1, 1))],
    );
    let repo = SqliteLibraryRepository::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE books;").unwrap();

    let books = BookService::new(&repo);
    assert!(matches!(
        books.get_book(),
        Err(RepoError::StorageUnavailable(DbError::Sqlite(_)))
    ));
    assert!(matches!(
        books.get_books(),
        Err(RepoError::StorageUnavailable(DbError::Sqlite(_)))
    ));

    let authors = AuthorService::new(&repo);
    assert!(matches!(
        authors.get_author(),
        Err(RepoError::StorageUnavailable(DbError::Sqlite(_)))
    ));
    assert!(matches!(
        authors.get_authors(),
        Err(RepoError::StorageUnavailable(DbError::Sqlite(_)))
    ));
}

#[test]
fn non_canonical_date_row_is_reported_as_invalid_data() {
    // Same tables without the CHECK constraints, as an older writer might
    // have produced them.
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE authors (id INTEGER PRIMARY KEY, name TEXT NOT NULL, surname TEXT NOT NULL);
         CREATE TABLE books (
             id INTEGER PRIMARY KEY,
             title TEXT NOT NULL,
             publish_date TEXT NOT NULL,
             price_cents INTEGER NOT NULL,
             quantity_published INTEGER NOT NULL,
             author_id INTEGER NOT NULL
         );
         INSERT INTO authors (id, name, surname) VALUES (1, 'A', 'B');
         INSERT INTO books VALUES (1, 'Red Dawn', '2012-05-3', 100, 1, 1);",
    )
    .unwrap();
    conn.pragma_update(None, "user_version", latest_version())
        .unwrap();

    let repo = SqliteLibraryRepository::try_new(&conn).unwrap();
    let err = BookService::new(&repo).get_books().unwrap_err();
    match err {
        RepoError::InvalidData(message) => assert!(message.contains("2012-05-3")),
        other => panic!("unexpected error: {other}"),
    }
}
