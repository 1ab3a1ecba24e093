//! Config CLI command.

use crate::Result;
use crate::config::ServerConfig;

/// Config command handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigCommand {
    /// Print the effective configuration.
    pub show: bool,
}

impl ConfigCommand {
    /// Creates a config command.
    #[must_use]
    pub const fn new(show: bool) -> Self {
        Self { show }
    }

    /// Renders the configuration, or `None` when nothing was asked for.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn run(&self, config: &ServerConfig) -> Result<Option<String>> {
        if !self.show {
            return Ok(None);
        }
        config.to_toml().map(Some)
    }
}
