//! CLI command implementations.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Run the HTTP catalog server |
//! | `books` | Query a catalog without starting a server |
//! | `config` | Show the effective configuration |
//!
//! # Example Usage
//!
//! ```bash
//! # Serve the built-in catalog on 127.0.0.1:5000
//! distant-reading serve
//!
//! # Serve a SQLite catalog
//! distant-reading serve --catalog sqlite --database books.db
//!
//! # Filter a SQLite catalog from the shell
//! distant-reading books --catalog sqlite --author "Connie Willis" --published 1999
//! ```

mod books;
mod config;
mod serve;

pub use books::BooksCommand;
pub use config::ConfigCommand;
pub use serve::ServeCommand;

use crate::config::{CatalogKind, ServerConfig};
use std::path::PathBuf;

/// Catalog selection shared by `serve` and `books`.
#[derive(Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Catalog kind override.
    pub catalog: Option<CatalogKind>,
    /// Database path override.
    pub database: Option<PathBuf>,
}

impl CatalogArgs {
    /// Applies the overrides on top of `config`.
    #[must_use]
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(catalog) = self.catalog {
            config = config.with_catalog(catalog);
        }
        if let Some(database) = &self.database {
            config = config.with_database(database.clone());
        }
        config
    }
}
