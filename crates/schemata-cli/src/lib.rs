//! # schemata-cli — Command-Line Interface
//!
//! Provides the `schemata` binary, a thin shell over `schemata-codec` for
//! inspecting schemas and documents from scripts and CI.
//!
//! ## Subcommands
//!
//! - `schemata schema` — Parse schema text and print its canonical form.
//! - `schemata decode` — Decode a document and print the native value.
//! - `schemata roundtrip` — Decode, re-encode, and print the document.
//!
//! Schema and document arguments accept inline text or `@path` to read a
//! file. An omitted document is read from stdin:
//!
//! ```bash
//! schemata schema '{"list": ["integer"]}'
//! schemata decode --schema '{"tuple":["integer",{"list":["character"]}]}' '[1, ["a", "b"]]'
//! echo '[1, 2]' | schemata roundtrip --schema @schema.json
//! ```

pub mod decode;
pub mod input;
pub mod roundtrip;
pub mod schema;

use std::path::Path;

use anyhow::{Context, Result};
use schemata_codec::{Codec, CodecConfig};

/// Build the codec for this invocation.
///
/// Without a `--config` file the library defaults apply.
pub fn load_codec(config: Option<&Path>) -> Result<Codec> {
    let config = match config {
        Some(path) => CodecConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CodecConfig::default(),
    };
    tracing::debug!(?config, "codec configured");
    Ok(Codec::new(config))
}
