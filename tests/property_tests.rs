//! Property-based tests for filter construction.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Every criterion becomes exactly one placeholder and one bound value
//! - Filter values never reach the SQL text
//! - The `SQLite` catalog and the in-memory matcher agree on the same rows

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{SEED_ROWS, seed_database};
use distant_reading::storage::sqlite::{build_filter_clause_numbered, build_select_query};
use distant_reading::{Book, BookFilter, CatalogBackend, Error, SqliteCatalog};
use proptest::prelude::*;
use tempfile::TempDir;

fn optional(values: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(values).prop_map(str::to_string))
}

fn filter_strategy() -> impl Strategy<Value = BookFilter> {
    (
        optional(&["1", "2", "3", "4", "5", "1.0", "3.0", "2.5", "x' OR '1'='1", "1; DROP TABLE books; --"]),
        optional(&["1999", "1992", "1969", "2000", "1999' --"]),
        optional(&[
            "Connie Willis",
            "Vernor Vinge",
            "Ursula K. Le Guin",
            "connie willis",
            "Robert') OR 1=1; --",
        ]),
    )
        .prop_map(|(id, published, author)| BookFilter::from_params(id, published, author))
}

fn seeded_books() -> Vec<Book> {
    SEED_ROWS
        .iter()
        .map(|(id, published, author, title, first)| {
            Book::new(*id, *title, *author, *first, published.to_string())
        })
        .collect()
}

proptest! {
    /// Property: one placeholder and one parameter per criterion.
    #[test]
    fn prop_placeholder_per_criterion(filter in filter_strategy(), start in 1usize..5) {
        let (clause, params, next) = build_filter_clause_numbered(&filter, start);
        let criteria = filter.criteria().len();

        prop_assert_eq!(params.len(), criteria);
        prop_assert_eq!(next, start + criteria);
        prop_assert_eq!(clause.matches(" = ?").count(), criteria);
        prop_assert_eq!(clause.is_empty(), filter.is_empty());
    }

    /// Property: arbitrary values are bound, never spliced into SQL.
    #[test]
    fn prop_values_never_in_sql(
        id in "'[ -~]{1,20}",
        published in "'[ -~]{1,20}",
        author in "'[ -~]{1,40}",
    ) {
        let filter = BookFilter::new()
            .with_id(id.clone())
            .with_published(published.clone())
            .with_author(author.clone());
        let query = build_select_query(&filter);

        prop_assert!(!query.sql.contains('\''));
        prop_assert_eq!(query.params, vec![id, published, author]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: the `SQLite` catalog returns exactly the rows the in-memory
    /// matcher accepts.
    #[test]
    fn prop_sqlite_agrees_with_matcher(filter in filter_strategy()) {
        let dir = TempDir::new().unwrap();
        let catalog = SqliteCatalog::new(seed_database(&dir));

        if filter.is_empty() {
            prop_assert!(matches!(catalog.find(&filter), Err(Error::NoFilterCriteria)));
            return Ok(());
        }

        let mut found: Vec<i64> = catalog.find(&filter).unwrap().iter().map(|b| b.id).collect();
        found.sort_unstable();
        let expected: Vec<i64> = seeded_books()
            .iter()
            .filter(|book| filter.matches(book))
            .map(|book| book.id)
            .collect();

        prop_assert_eq!(found, expected);
        prop_assert_eq!(catalog.all().unwrap().len(), SEED_ROWS.len());
    }
}
