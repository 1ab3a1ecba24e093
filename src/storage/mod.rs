//! Storage layer abstraction.
//!
//! Catalog backends implement [`CatalogBackend`]; [`open_catalog`] picks one
//! from configuration.

#![allow(clippy::significant_drop_tightening)]

pub mod catalog;
pub mod metrics;
pub mod sqlite;
pub mod traits;

pub use catalog::{MemoryCatalog, SqliteCatalog};
pub use self::metrics::record_operation_metrics;
pub use traits::CatalogBackend;

use crate::config::{CatalogKind, ServerConfig};
use std::sync::Arc;

/// Builds the catalog backend selected by `config`.
///
/// Nothing is opened here; the `SQLite` backend connects on each lookup, so a
/// missing database surfaces as a per-request error rather than at startup.
#[must_use]
pub fn open_catalog(config: &ServerConfig) -> Arc<dyn CatalogBackend> {
    match config.catalog {
        CatalogKind::Memory => Arc::new(MemoryCatalog::fixed()),
        CatalogKind::Sqlite => Arc::new(SqliteCatalog::new(config.database.clone())),
    }
}
