//! # Schema Subcommand
//!
//! Parses schema text and prints its canonical form. A schema that parses
//! here is accepted unchanged by `decode` and `roundtrip`.

use anyhow::{Context, Result};
use clap::Args;

use schemata_core::Schema;

use crate::input::resolve_text;

/// Arguments for the `schemata schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Schema text, or `@path` to read it from a file.
    pub schema: String,

    /// Pretty-print the canonical JSON.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    println!("{}", render_schema(args)?);
    Ok(0)
}

/// Parse `--schema`-style input into the typed tree, with CLI context.
pub fn parse_schema(arg: &str) -> Result<Schema> {
    let text = resolve_text(arg)?;
    text.parse::<Schema>().context("invalid schema")
}

fn render_schema(args: &SchemaArgs) -> Result<String> {
    let schema = parse_schema(&args.schema)?;
    tracing::info!(kind = schema.kind_name(), depth = schema.depth(), "parsed schema");
    if args.pretty {
        Ok(serde_json::to_string_pretty(&schema.to_value())?)
    } else {
        Ok(schema.to_string())
    }
}
