//! HTTP surface of the catalog.
//!
//! | Path | Memory catalog | `SQLite` catalog |
//! |------|----------------|------------------|
//! | `/` | welcome page | welcome page |
//! | `/api/v1/resources/books/all` | every book | every row |
//! | `/api/v1/resources/books` | `id` lookup | `id`/`published`/`author` filter |
//!
//! Everything else answers with the fixed 404 page.

mod handlers;
mod pages;

pub use handlers::{FilterParams, IdParams, parse_id};
pub use pages::{ApiError, MISSING_ID_MESSAGE, NOT_FOUND_BODY, home_page};

use crate::config::{CatalogKind, ServerConfig};
use crate::storage::{CatalogBackend, open_catalog};
use crate::{Error, Result};
use axum::Router;
use axum::http::header;
use axum::middleware;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Catalog the handlers read from.
    pub catalog: Arc<dyn CatalogBackend>,
    /// Which catalog variant is served; selects the lookup handler.
    pub kind: CatalogKind,
}

impl AppState {
    /// Creates state for a catalog.
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogBackend>, kind: CatalogKind) -> Self {
        Self { catalog, kind }
    }
}

/// Builds the router for a catalog.
pub fn build_router(state: AppState) -> Router {
    let lookup = match state.kind {
        CatalogKind::Memory => get(handlers::find_by_id),
        CatalogKind::Sqlite => get(handlers::filter_books),
    };

    Router::new()
        .route("/", get(handlers::home))
        .route("/api/v1/resources/books/all", get(handlers::all_books))
        .route("/api/v1/resources/books", lookup)
        .fallback(handlers::fallback)
        .layer(middleware::from_fn(handlers::track_requests))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            header::HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP server bound to one catalog.
pub struct CatalogServer {
    config: ServerConfig,
    catalog: Arc<dyn CatalogBackend>,
}

impl CatalogServer {
    /// Creates a server for the catalog named in `config`.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let catalog = open_catalog(&config);
        Self { config, catalog }
    }

    /// Replaces the catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogBackend>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Address the server binds to.
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.config.addr
    }

    /// Builds the router without binding.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(AppState::new(Arc::clone(&self.catalog), self.config.catalog))
    }

    /// Binds and serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn run(self) -> Result<()> {
        let app = self.router();
        let addr = self.config.addr;

        let listener =
            tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|e| Error::OperationFailed {
                    operation: "bind".to_string(),
                    cause: format!("{addr}: {e}"),
                })?;

        tracing::info!(
            %addr,
            catalog = %self.config.catalog,
            backend = self.catalog.name(),
            "Serving book catalog"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::OperationFailed {
                operation: "serve".to_string(),
                cause: e.to_string(),
            })
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCatalog;

    #[test]
    fn test_server_uses_configured_catalog() {
        let server = CatalogServer::new(ServerConfig::new());
        assert_eq!(server.catalog.name(), "memory");
        assert_eq!(server.addr().port(), 5000);
    }

    #[test]
    fn test_with_catalog_replaces_backend() {
        let config = ServerConfig::new().with_catalog(CatalogKind::Sqlite);
        let server = CatalogServer::new(config).with_catalog(Arc::new(MemoryCatalog::fixed()));
        assert_eq!(server.catalog.name(), "memory");
    }
}
