//! Books CLI command.
//!
//! Runs the same catalog lookups as the HTTP API and prints the JSON body the
//! API would have returned.

use super::CatalogArgs;
use crate::config::ServerConfig;
use crate::models::BookFilter;
use crate::storage::open_catalog;
use crate::{Error, Result};

/// Books command handler.
#[derive(Debug, Clone, Default)]
pub struct BooksCommand {
    /// List every book, ignoring filters.
    pub all: bool,
    /// `id` criterion.
    pub id: Option<String>,
    /// `published` criterion.
    pub published: Option<String>,
    /// `author` criterion.
    pub author: Option<String>,
    /// Catalog selection.
    pub catalog: CatalogArgs,
}

impl BooksCommand {
    /// Builds the filter from the criteria; empty values are dropped.
    #[must_use]
    pub fn filter(&self) -> BookFilter {
        BookFilter::from_params(self.id.clone(), self.published.clone(), self.author.clone())
    }

    /// Runs the lookup and returns pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFilterCriteria`] when neither `--all` nor a
    /// criterion is given, or an error if the catalog cannot be read.
    pub fn run(&self, config: ServerConfig) -> Result<String> {
        let config = self.catalog.apply(config);
        let catalog = open_catalog(&config);

        let books = if self.all {
            catalog.all()?
        } else {
            catalog.find(&self.filter())?
        };
        tracing::debug!(count = books.len(), backend = catalog.name(), "books lookup");

        serde_json::to_string_pretty(&books).map_err(|e| Error::OperationFailed {
            operation: "serialize_books".to_string(),
            cause: e.to_string(),
        })
    }
}
