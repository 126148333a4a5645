//! gg-release - operator tooling for publishing the GitGuardian MCP server

mod cli;

use clap::{Parser, Subcommand};
use cli::pypi::{PypiOptions, run_pypi};
use cli::registry::{RegistryOptions, run_registry};
use cli::style::failure;
use gg_mcp::error::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Release tooling for the GitGuardian MCP server
#[derive(Parser)]
#[command(name = "gg-release", version)]
struct Cli {
    /// Project root containing pyproject.toml and server.json
    #[arg(long, global = true, default_value = ".")]
    path: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build distributions and upload them to PyPI
    Pypi {
        /// Upload to TestPyPI instead of PyPI
        #[arg(short, long)]
        test: bool,
    },
    /// Validate server.json and publish to the MCP registry
    Registry {
        /// Validate everything but do not publish
        #[arg(short, long)]
        dry_run: bool,
    },
}

/// `RUST_LOG` wins; otherwise `--verbose` enables debug for our crates.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("gg_mcp=debug,gg_release=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let root = cli::resolve_root(&cli.path)?;

    match cli.command {
        Commands::Pypi { test } => run_pypi(&root, PypiOptions { test }).await,
        Commands::Registry { dry_run } => run_registry(&root, RegistryOptions { dry_run }).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            anstream::eprintln!("{}", failure(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}
