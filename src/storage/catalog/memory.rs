//! In-memory catalog backend.
//!
//! Serves a fixed list of records loaded at startup. Lookups are linear scans,
//! which is fine for the handful of records this backend is meant for.

use crate::models::{Book, BookFilter, fixed_catalog};
use crate::storage::metrics::record_operation_metrics;
use crate::storage::traits::CatalogBackend;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Catalog backed by an immutable, ordered list of records.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    books: Arc<[Book]>,
}

impl MemoryCatalog {
    /// Creates a catalog over the given records, preserving their order.
    #[must_use]
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: books.into(),
        }
    }

    /// Creates a catalog over the built-in records.
    #[must_use]
    pub fn fixed() -> Self {
        Self::new(fixed_catalog())
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Returns true if the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::fixed()
    }
}

impl CatalogBackend for MemoryCatalog {
    fn name(&self) -> &'static str {
        "memory"
    }

    #[instrument(skip(self), fields(operation = "all", backend = "memory"))]
    fn all(&self) -> Result<Vec<Book>> {
        let start = Instant::now();
        let books = self.books.to_vec();
        record_operation_metrics("memory", "all", start, "success");
        Ok(books)
    }

    #[instrument(skip(self), fields(operation = "find", backend = "memory"))]
    fn find(&self, filter: &BookFilter) -> Result<Vec<Book>> {
        if filter.is_empty() {
            return Err(Error::NoFilterCriteria);
        }

        let start = Instant::now();
        let books: Vec<Book> = self
            .books
            .iter()
            .filter(|book| filter.matches(book))
            .cloned()
            .collect();
        tracing::debug!(matches = books.len(), "memory catalog scan complete");
        record_operation_metrics("memory", "find", start, "success");
        Ok(books)
    }

    #[instrument(skip(self), fields(operation = "find_by_id", backend = "memory"))]
    fn find_by_id(&self, id: i64) -> Result<Vec<Book>> {
        let start = Instant::now();
        let books: Vec<Book> = self.books.iter().filter(|book| book.id == id).cloned().collect();
        record_operation_metrics("memory", "find_by_id", start, "success");
        Ok(books)
    }
}
