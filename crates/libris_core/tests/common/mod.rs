#![allow(dead_code)]

use chrono::NaiveDate;
use libris_core::db::open_db_in_memory;
use libris_core::{Author, Book, LibraryRepository, MemoryLibraryRepository, SqliteLibraryRepository};
use rusqlite::{params, Connection};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn author(id: i64) -> Author {
    Author::new(id, format!("Name{id}"), format!("Surname{id}"))
}

pub fn book(id: i64, author_id: i64, title: &str, publish_date: NaiveDate) -> Book {
    Book {
        id,
        title: title.to_string(),
        publish_date,
        price_cents: 1_000,
        quantity_published: 100,
        author_id,
    }
}

pub fn priced(mut book: Book, price_cents: i64, quantity_published: i64) -> Book {
    book.price_cents = price_cents;
    book.quantity_published = quantity_published;
    book
}

/// Inserts rows the way an external writer would.
pub fn seed(conn: &Connection, authors: &[Author], books: &[Book]) {
    for author in authors {
        conn.execute(
            "INSERT INTO authors (id, name, surname) VALUES (?1, ?2, ?3);",
            params![author.id, author.name, author.surname],
        )
        .unwrap();
    }
    for book in books {
        conn.execute(
            "INSERT INTO books (id, title, publish_date, price_cents, quantity_published, author_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                book.id,
                book.title,
                book.publish_date.format("%Y-%m-%d").to_string(),
                book.price_cents,
                book.quantity_published,
                book.author_id,
            ],
        )
        .unwrap();
    }
}

/// Runs `check` against a seeded SQLite repository and an equivalent
/// in-memory repository.
pub fn with_backends(authors: &[Author], books: &[Book], check: impl Fn(&dyn LibraryRepository)) {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, authors, books);
    let sqlite = SqliteLibraryRepository::try_new(&conn).unwrap();
    check(&sqlite);

    let memory = MemoryLibraryRepository::try_new(authors.to_vec(), books.to_vec()).unwrap();
    check(&memory);
}

pub fn ids<T>(items: &[T], id: impl Fn(&T) -> i64) -> Vec<i64> {
    items.iter().map(id).collect()
}
