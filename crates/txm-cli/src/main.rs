//! # txm CLI entry point
//!
//! Parses command-line arguments, loads the optional config file, sets up
//! tracing, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use txm_cli::config::CliConfig;
use txm_cli::process::{run_process, ProcessArgs};
use txm_cli::prove::{run_prove, ProveArgs};
use txm_cli::root::{run_root, RootArgs};
use txm_cli::verify::{run_verify, VerifyArgs};

/// Transaction Merkle toolkit.
///
/// Computes Merkle roots over ordered transaction id lists, emits inclusion
/// proofs for individual transactions, and verifies proofs against a root.
#[derive(Parser, Debug)]
#[command(name = "txm", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the Merkle root of a transaction id list.
    Root(RootArgs),

    /// Build the inclusion proof for one transaction.
    Prove(ProveArgs),

    /// Verify an inclusion proof against a root.
    Verify(VerifyArgs),

    /// Root, proof, and verification for one transaction in a single report.
    Process(ProcessArgs),
}

/// Pick the tracing filter: `-v` flags win, then the config file, then `warn`.
fn filter_directive(verbose: u8, configured: Option<&str>) -> String {
    match (verbose, configured) {
        (0, Some(directive)) => directive.to_string(),
        (0, None) => "warn".to_string(),
        (1, _) => "info".to_string(),
        (2, _) => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref());
    let configured_filter = config
        .as_ref()
        .ok()
        .and_then(|c| c.log_filter.as_deref());
    let directive = filter_directive(cli.verbose, configured_filter);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?config, "txm CLI starting");

    let result = match cli.command {
        Commands::Root(args) => run_root(&args, &config),
        Commands::Prove(args) => run_prove(&args, &config),
        Commands::Verify(args) => run_verify(&args, &config),
        Commands::Process(args) => run_process(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
