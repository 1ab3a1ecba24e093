//! Catalog backend trait.
//!
//! A catalog is a read-only source of [`Book`] records. The HTTP handlers and
//! the CLI only talk to this trait, so both catalog flavours share them.
//!
//! # Available Implementations
//!
//! | Backend | Source | Ordering |
//! |---------|--------|----------|
//! | `MemoryCatalog` | Fixed in-process list | Insertion order |
//! | `SqliteCatalog` | `books` table, connection per call | Unspecified |

use crate::Result;
use crate::models::{Book, BookFilter};

/// Trait for read-only catalog backends.
///
/// # Implementor Notes
///
/// - Methods use `&self` to enable sharing via `Arc<dyn CatalogBackend>`
/// - Neither method may mutate the underlying store
/// - `find` must return [`crate::Error::NoFilterCriteria`] for an empty filter
///   rather than every record
pub trait CatalogBackend: Send + Sync {
    /// Short backend name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Returns every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn all(&self) -> Result<Vec<Book>>;

    /// Returns every record satisfying all criteria of `filter`.
    ///
    /// An empty result is not an error. Callers must not rely on ordering.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoFilterCriteria`] if `filter` is empty, or an
    /// error if the store cannot be read.
    fn find(&self, filter: &BookFilter) -> Result<Vec<Book>>;

    /// Returns every record whose `id` equals `id`.
    ///
    /// The default goes through [`CatalogBackend::find`]; backends that hold
    /// typed ids can compare them directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_by_id(&self, id: i64) -> Result<Vec<Book>> {
        self.find(&BookFilter::new().with_id(id.to_string()))
    }
}
