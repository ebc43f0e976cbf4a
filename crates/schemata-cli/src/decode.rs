//! # Decode Subcommand
//!
//! Decodes an interchange document under a schema and prints the resulting
//! native value in the notation of `NativeValue`'s `Display`:
//!
//! ```text
//! $ schemata decode --schema '{"tuple":["integer",{"list":["character"]}]}' '[1, ["a", "b"]]'
//! list(int[1], chr["a", "b"])
//! ```

use std::io::Read;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use schemata_codec::Codec;
use schemata_core::{NativeValue, Schema};

use crate::input::resolve_document;
use crate::schema::parse_schema;

/// Arguments for the `schemata decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Schema text, or `@path` to read it from a file.
    #[arg(long, short)]
    pub schema: String,

    /// Document text, `@path`, or `-` for stdin. Reads stdin when omitted.
    pub document: Option<String>,

    /// Print the native type and length instead of the value.
    #[arg(long)]
    pub describe: bool,
}

/// Execute the decode subcommand.
pub fn run_decode(args: &DecodeArgs, codec: &Codec) -> Result<u8> {
    let schema = parse_schema(&args.schema)?;
    let value = decode_input(&schema, args.document.as_deref(), codec, std::io::stdin().lock())?;
    println!("{}", render(&value, args.describe));
    Ok(0)
}

/// Resolve the document argument and decode it under `schema`.
///
/// Shared with `roundtrip`, which re-encodes the result.
pub fn decode_input(
    schema: &Schema,
    document: Option<&str>,
    codec: &Codec,
    stdin: impl Read,
) -> Result<NativeValue> {
    let text = resolve_document(document, stdin)?;
    let doc: Value = serde_json::from_str(&text).context("invalid document")?;
    let value = codec
        .decode(&doc, schema)
        .with_context(|| format!("cannot decode document under {schema}"))?;
    tracing::info!(native = %value.native_type(), len = value.len(), "decoded document");
    Ok(value)
}

fn render(value: &NativeValue, describe: bool) -> String {
    if describe {
        value.describe()
    } else {
        value.to_string()
    }
}
