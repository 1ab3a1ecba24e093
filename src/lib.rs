//! # Distant Reading
//!
//! A read-only HTTP API over a catalog of science fiction books.
//!
//! The catalog comes in two flavours that share the same handlers:
//!
//! - **Memory**: a fixed, ordered list of records compiled into the binary.
//! - **`SQLite`**: rows of a `books` table, read through a fresh read-only
//!   connection per request, with multi-field filtering.
//!
//! ## Example
//!
//! ```rust,ignore
//! use distant_reading::{BookFilter, CatalogBackend, MemoryCatalog};
//!
//! let catalog = MemoryCatalog::fixed();
//! let books = catalog.find(&BookFilter::new().with_id("1"))?;
//! assert_eq!(books.len(), 1);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod models;
pub mod observability;
pub mod server;
pub mod storage;

pub use config::{CatalogKind, ServerConfig};
pub use models::{Book, BookFilter, FilterField};
pub use server::{AppState, CatalogServer, build_router};
pub use storage::{CatalogBackend, MemoryCatalog, SqliteCatalog, open_catalog};

/// Error type for catalog operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When | HTTP status |
/// |---------|-------------|-------------|
/// | `InvalidInput` | Missing or non-numeric `id` on the memory catalog, bad config values | 400 |
/// | `NoFilterCriteria` | A filtered lookup was asked for with no criteria | 404 |
/// | `OperationFailed` | Database cannot be opened, query fails, server cannot bind | 500 |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// The message is written for the caller and is returned verbatim as the
    /// response body.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A filtered lookup was requested without any filter criteria.
    #[error("no filter criteria supplied")]
    NoFilterCriteria,

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;
