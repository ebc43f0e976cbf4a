//! # schemata CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, builds
//! the codec from `--config`, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use schemata_cli::decode::{run_decode, DecodeArgs};
use schemata_cli::load_codec;
use schemata_cli::roundtrip::{run_roundtrip, RoundtripArgs};
use schemata_cli::schema::{run_schema, SchemaArgs};

/// Schema-directed conversion between native values and JSON documents.
#[derive(Parser, Debug)]
#[command(name = "schemata", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML codec configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a schema and print its canonical form.
    Schema(SchemaArgs),

    /// Decode a document and print the native value.
    Decode(DecodeArgs),

    /// Decode a document, re-encode it, and print the result.
    Roundtrip(RoundtripArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "schemata CLI starting");

    let result = load_codec(cli.config.as_deref()).and_then(|codec| match &cli.command {
        Commands::Schema(args) => run_schema(args),
        Commands::Decode(args) => run_decode(args, &codec),
        Commands::Roundtrip(args) => run_roundtrip(args, &codec),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
