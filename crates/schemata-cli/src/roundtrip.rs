//! # Roundtrip Subcommand
//!
//! Decodes a document under a schema, encodes the native value back, and
//! prints the resulting document. A document that survives unchanged is in
//! the canonical shape for its schema; one that changes (`2.0` under
//! `"integer"` becoming `2`, say) shows what a consumer will actually see.

use anyhow::{Context, Result};
use clap::Args;

use schemata_codec::Codec;

use crate::decode::decode_input;
use crate::schema::parse_schema;

/// Arguments for the `schemata roundtrip` subcommand.
#[derive(Args, Debug)]
pub struct RoundtripArgs {
    /// Schema text, or `@path` to read it from a file.
    #[arg(long, short)]
    pub schema: String,

    /// Document text, `@path`, or `-` for stdin. Reads stdin when omitted.
    pub document: Option<String>,

    /// Pretty-print the output document.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the roundtrip subcommand.
pub fn run_roundtrip(args: &RoundtripArgs, codec: &Codec) -> Result<u8> {
    println!("{}", roundtrip(args, codec, std::io::stdin().lock())?);
    Ok(0)
}

fn roundtrip(args: &RoundtripArgs, codec: &Codec, stdin: impl std::io::Read) -> Result<String> {
    let schema = parse_schema(&args.schema)?;
    let value = decode_input(&schema, args.document.as_deref(), codec, stdin)?;
    let doc = codec
        .encode(&value, &schema)
        .with_context(|| format!("cannot re-encode value under {schema}"))?;
    if args.pretty {
        Ok(serde_json::to_string_pretty(&doc)?)
    } else {
        Ok(doc.to_string())
    }
}
