//! Serve CLI command.

use super::CatalogArgs;
use crate::Result;
use crate::config::ServerConfig;
use crate::server::CatalogServer;
use std::net::SocketAddr;

/// Serve command handler.
#[derive(Debug, Clone, Default)]
pub struct ServeCommand {
    /// Listen address override.
    pub addr: Option<SocketAddr>,
    /// Catalog selection.
    pub catalog: CatalogArgs,
}

impl ServeCommand {
    /// Creates a serve command with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the server configuration.
    #[must_use]
    pub fn resolve(&self, config: ServerConfig) -> ServerConfig {
        let config = self.catalog.apply(config);
        match self.addr {
            Some(addr) => config.with_addr(addr),
            None => config,
        }
    }

    /// Runs the server until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot bind or fails while serving.
    pub async fn run(&self, config: ServerConfig) -> Result<()> {
        CatalogServer::new(self.resolve(config)).run().await
    }
}
