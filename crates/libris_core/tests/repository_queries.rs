mod common;

use common::{author, book, date, with_backends};
use libris_core::{AuthorBookCount, BookListQuery, LibraryRepository, RECENT_YEAR_CUTOFF};

#[test]
fn count_books_by_author_groups_filtered_books() {
    let authors = [author(1), author(2), author(3)];
    let books = [
        book(1, 1, "a", date(2016, 1, 1)),
        book(2, 1, "b", date(2017, 1, 1)),
        book(3, 2, "c", date(2019, 1, 1)),
        book(4, 2, "d", date(2015, 12, 31)),
        book(5, 3, "e", date(2010, 1, 1)),
    ];
    let recent = BookListQuery {
        published_after_year: Some(RECENT_YEAR_CUTOFF),
        ..BookListQuery::default()
    };

    with_backends(&authors, &books, |repo| {
        assert_eq!(
            repo.count_books_by_author(&recent).unwrap(),
            vec![
                AuthorBookCount {
                    author_id: 1,
                    book_count: 2
                },
                AuthorBookCount {
                    author_id: 2,
                    book_count: 1
                },
            ]
        );
        assert_eq!(
            repo.count_books_by_author(&BookListQuery::default())
                .unwrap()
                .len(),
            3
        );
    });
}
