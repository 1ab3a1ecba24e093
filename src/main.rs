//! Binary entry point for distant-reading.
//!
//! This binary serves the book catalog over HTTP and answers catalog queries
//! from the shell.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use distant_reading::ServerConfig;
use distant_reading::cli::{BooksCommand, CatalogArgs, ConfigCommand, ServeCommand};
use distant_reading::config::{CatalogKind, parse_addr, parse_catalog};
use distant_reading::observability::{self, InitOptions};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

/// Distant Reading Archive - a read-only API over a catalog of science fiction
/// novels.
#[derive(Parser)]
#[command(name = "distant-reading")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "DISTANT_READING_CONFIG_PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve {
        /// Catalog to serve: memory or sqlite.
        #[arg(long, value_parser = catalog_arg)]
        catalog: Option<CatalogKind>,

        /// Address to listen on.
        #[arg(short, long, value_parser = addr_arg)]
        addr: Option<SocketAddr>,

        /// `SQLite` database file.
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Query the catalog without starting a server.
    Books {
        /// List every book.
        #[arg(long, conflicts_with_all = ["id", "published", "author"])]
        all: bool,

        /// Match on id.
        #[arg(long)]
        id: Option<String>,

        /// Match on publication year.
        #[arg(long)]
        published: Option<String>,

        /// Match on author.
        #[arg(long)]
        author: Option<String>,

        /// Catalog to query: memory or sqlite.
        #[arg(long, value_parser = catalog_arg)]
        catalog: Option<CatalogKind>,

        /// `SQLite` database file.
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Show the effective configuration.
        #[arg(long)]
        show: bool,
    },
}

fn catalog_arg(s: &str) -> Result<CatalogKind, String> {
    parse_catalog(s).map_err(|e| e.to_string())
}

fn addr_arg(s: &str) -> Result<SocketAddr, String> {
    parse_addr(s).map_err(|e| e.to_string())
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    let expose_metrics = matches!(cli.command, Commands::Serve { .. });
    let _observability = match observability::init_from_config(
        &config.observability,
        InitOptions {
            verbose: cli.verbose,
            metrics_expose: expose_metrics,
        },
    ) {
        Ok(handle) => {
            if let Some(addr) = handle.metrics_addr() {
                tracing::info!(%addr, "Prometheus metrics listener started");
            }
            handle
        },
        Err(e) => {
            eprintln!("Failed to initialize observability: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Loads configuration from the given path or the default location, then
/// applies environment overrides.
fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ServerConfig> {
    let config = match path {
        Some(path) => ServerConfig::load_from_file(path)?,
        None => ServerConfig::load_default(),
    };
    Ok(config.apply_env_overrides()?)
}

/// Runs the selected command.
async fn run_command(command: Commands, config: ServerConfig) -> anyhow::Result<()> {
    match command {
        Commands::Serve {
            catalog,
            addr,
            database,
        } => {
            let cmd = ServeCommand {
                addr,
                catalog: CatalogArgs { catalog, database },
            };
            cmd.run(config).await?;
        },

        Commands::Books {
            all,
            id,
            published,
            author,
            catalog,
            database,
        } => {
            let cmd = BooksCommand {
                all,
                id,
                published,
                author,
                catalog: CatalogArgs { catalog, database },
            };
            let output = tokio::task::spawn_blocking(move || cmd.run(config)).await??;
            println!("{output}");
        },

        Commands::Config { show } => match ConfigCommand::new(show).run(&config)? {
            Some(output) => print!("{output}"),
            None => eprintln!("Nothing to do; pass --show to print the configuration."),
        },
    }

    Ok(())
}
