//! `SQLite` catalog backend.
//!
//! Reads records from a `books` table owned by someone else. The schema and
//! its contents are a prerequisite; this backend never creates or alters
//! anything.
//!
//! Every call opens its own read-only connection and drops it before
//! returning, on success and on error alike.

use crate::models::{Book, BookFilter};
use crate::storage::metrics::record_operation_metrics;
use crate::storage::sqlite::{FilterQuery, book_from_row, build_select_query, open_read_only};
use crate::storage::traits::CatalogBackend;
use crate::{Error, Result};
use rusqlite::{Connection, params_from_iter};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::instrument;

/// Catalog backed by a `books` table in an `SQLite` database file.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    /// Path to the database file.
    db_path: PathBuf,
}

impl SqliteCatalog {
    /// Creates a catalog for the database at `db_path`.
    ///
    /// The file is not opened until the first lookup.
    #[must_use]
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Returns the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn run_query(conn: &Connection, query: &FilterQuery) -> Result<Vec<Book>> {
        let mut stmt = conn.prepare(&query.sql).map_err(|e| Error::OperationFailed {
            operation: "prepare_query".to_string(),
            cause: e.to_string(),
        })?;

        let rows = stmt
            .query_map(params_from_iter(query.params.iter()), book_from_row)
            .map_err(|e| Error::OperationFailed {
                operation: "execute_query".to_string(),
                cause: e.to_string(),
            })?;

        rows.collect::<rusqlite::Result<Vec<Book>>>()
            .map_err(|e| Error::OperationFailed {
                operation: "read_rows".to_string(),
                cause: e.to_string(),
            })
    }

    fn execute(&self, operation: &'static str, filter: &BookFilter) -> Result<Vec<Book>> {
        let start = Instant::now();
        let result = (|| {
            let conn = open_read_only(&self.db_path)?;
            let query = build_select_query(filter);
            tracing::debug!(sql = %query.sql, params = query.params.len(), "running catalog query");
            Self::run_query(&conn, &query)
        })();

        let status = if result.is_ok() { "success" } else { "error" };
        record_operation_metrics("sqlite", operation, start, status);
        result
    }
}

impl CatalogBackend for SqliteCatalog {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    #[instrument(skip(self), fields(operation = "all", backend = "sqlite", db = %self.db_path.display()))]
    fn all(&self) -> Result<Vec<Book>> {
        self.execute("all", &BookFilter::new())
    }

    #[instrument(skip(self), fields(operation = "find", backend = "sqlite", db = %self.db_path.display()))]
    fn find(&self, filter: &BookFilter) -> Result<Vec<Book>> {
        if filter.is_empty() {
            return Err(Error::NoFilterCriteria);
        }
        self.execute("find", filter)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rusqlite::params;
    use tempfile::TempDir;

    fn seed(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("books.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE books (
                id INTEGER PRIMARY KEY,
                published INT,
                author VARCHAR,
                title VARCHAR,
                first_sentence VARCHAR
            );",
        )
        .unwrap();
        let rows: [(i64, i64, &str, &str, &str); 4] = [
            (1, 1999, "Connie Willis", "To Say Nothing of the Dog", "There were five of us."),
            (2, 1992, "Connie Willis", "Doomsday Book", "Mr. Dunworthy opened the door."),
            (3, 1999, "Vernor Vinge", "A Deepness in the Sky", "The humans had arrived."),
            (4, 1969, "Ursula K. Le Guin", "The Left Hand of Darkness", "I'll make my report."),
        ];
        for (id, published, author, title, first) in rows {
            conn.execute(
                "INSERT INTO books (id, published, author, title, first_sentence) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, published, author, title, first],
            )
            .unwrap();
        }
        path
    }

    fn sorted_ids(books: &[Book]) -> Vec<i64> {
        let mut ids: Vec<i64> = books.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_all() {
        let dir = TempDir::new().unwrap();
        let catalog = SqliteCatalog::new(seed(&dir));

        let books = catalog.all().unwrap();
        assert_eq!(sorted_ids(&books), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_integer_published_rendered_as_text() {
        let dir = TempDir::new().unwrap();
        let catalog = SqliteCatalog::new(seed(&dir));

        let books = catalog.find(&BookFilter::new().with_id("4")).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].published, "1969");
        assert_eq!(books[0].title, "The Left Hand of Darkness");
    }

    #[test]
    fn test_find_author_and_published() {
        let dir = TempDir::new().unwrap();
        let catalog = SqliteCatalog::new(seed(&dir));

        let filter = BookFilter::new()
            .with_author("Connie Willis")
            .with_published("1999");
        let books = catalog.find(&filter).unwrap();
        assert_eq!(sorted_ids(&books), vec![1]);
    }

    #[test]
    fn test_find_by_id_binds_typed_id() {
        let dir = TempDir::new().unwrap();
        let catalog = SqliteCatalog::new(seed(&dir));

        assert_eq!(sorted_ids(&catalog.find_by_id(3).unwrap()), vec![3]);
        assert!(catalog.find_by_id(99).unwrap().is_empty());
    }

    #[test]
    fn test_find_no_match_is_empty() {
        let dir = TempDir::new().unwrap();
        let catalog = SqliteCatalog::new(seed(&dir));

        let books = catalog
            .find(&BookFilter::new().with_author("Nobody"))
            .unwrap();
        assert!(books.is_empty());
    }

    #[test]
    fn test_find_rejects_empty_filter() {
        let dir = TempDir::new().unwrap();
        let catalog = SqliteCatalog::new(seed(&dir));

        assert!(matches!(
            catalog.find(&BookFilter::new()),
            Err(Error::NoFilterCriteria)
        ));
    }

    #[test]
    fn test_missing_database_fails() {
        let dir = TempDir::new().unwrap();
        let catalog = SqliteCatalog::new(dir.path().join("absent.db"));

        let result = catalog.all();
        assert!(matches!(
            result,
            Err(Error::OperationFailed { ref operation, .. }) if operation == "open_catalog"
        ));
        assert!(!dir.path().join("absent.db").exists());
    }

    #[test]
    fn test_missing_table_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE other (x INTEGER);")
            .unwrap();

        let result = SqliteCatalog::new(path).all();
        assert!(matches!(result, Err(Error::OperationFailed { .. })));
    }
}
