//! # schemata-codec — Schema-Directed Conversion
//!
//! Converts between [`NativeValue`]s and JSON interchange documents
//! (`serde_json::Value`), with a [`Schema`] deciding every ambiguity:
//!
//! - [`encode`] — native value + schema → document.
//! - [`decode`] — document + schema → native value.
//! - [`serialize`] / [`deserialize`] — the same, starting from text.
//!
//! Both directions are one recursive descent over the schema in lock-step
//! with the value or document. They are pure and synchronous and keep no
//! state between calls, so a single `Schema` and `Codec` can serve any
//! number of threads.
//!
//! ## Round-Trip Guarantee
//!
//! For every schema `S` and native value `V` in the canonical shape for `S`:
//!
//! ```text
//! decode(encode(V, S), S) == V
//! ```
//!
//! The canonical shape is what [`decode`] produces: a numeric vector under a
//! `numeric` atom, one typed vector under `List(Atom)`. Encode also accepts
//! two non-canonical inputs, which come back in canonical shape:
//!
//! - an integer vector under a `numeric` schema decodes as numeric
//!   (`int[3]` → `3` → `num[3]`);
//! - a generic list of length-1 vectors under `List(Atom)` decodes as a
//!   single vector (`list(int[1], int[2])` → `[1,2]` → `int[1, 2]`).
//!
//! Element values and vector length survive in both cases. The second
//! re-encodes to the same document; the first re-encodes as floating
//! numbers (`3.0`).
//!
//! ## Error Policy
//!
//! Every schema/value mismatch is a hard failure carrying the
//! [`SchemaPath`](schemata_core::SchemaPath) of the offending node. There are
//! no partial results and no silent fallbacks to `null`.
//!
//! ## Example
//!
//! ```
//! use schemata_codec::{deserialize, serialize};
//! use schemata_core::NativeValue;
//!
//! let schema = r#"{"tuple":["integer","integer"]}"#;
//! let value = NativeValue::list([NativeValue::integer(1), NativeValue::integer(2)]);
//!
//! let text = serialize(&value, schema).unwrap();
//! assert_eq!(text, "[1,2]");
//! assert_eq!(deserialize(&text, schema).unwrap(), value);
//! ```

pub mod config;
mod decode;
mod encode;
mod walk;

pub use config::{CodecConfig, ConfigError, IntegerCoercion, DEFAULT_MAX_DEPTH};
pub use schemata_core::{CodecError, NativeValue, Schema, SchemataError};

use serde_json::Value;

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::walk::Cursor;

/// A configured encoder/decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `value` as an interchange document under `schema`.
    ///
    /// # Errors
    ///
    /// Fails on the first node where the value does not conform to the
    /// schema, where the value is an unsupported native type, or where the
    /// schema is a `Record`.
    pub fn encode(&self, value: &NativeValue, schema: &Schema) -> Result<Value, CodecError> {
        tracing::trace!(%schema, native = %value.native_type(), "encode");
        let result = Encoder::new(Cursor::new(&self.config)).encode(value, schema);
        if let Err(e) = &result {
            tracing::debug!(error = %e, "encode failed");
        }
        result
    }

    /// Decode `doc` into a native value shaped by `schema`.
    ///
    /// # Errors
    ///
    /// Fails on the first node where the document is structurally
    /// incompatible with the schema, or where the schema is a `Record`.
    pub fn decode(&self, doc: &Value, schema: &Schema) -> Result<NativeValue, CodecError> {
        tracing::trace!(%schema, "decode");
        let result = Decoder::new(Cursor::new(&self.config)).decode(doc, schema);
        if let Err(e) = &result {
            tracing::debug!(error = %e, "decode failed");
        }
        result
    }

    /// Parse `schema_text`, encode `value`, and return compact document text.
    pub fn serialize(&self, value: &NativeValue, schema_text: &str) -> Result<String, SchemataError> {
        let schema: Schema = schema_text.parse()?;
        let doc = self.encode(value, &schema)?;
        Ok(doc.to_string())
    }

    /// Parse `schema_text` and `doc_text`, then decode.
    pub fn deserialize(&self, doc_text: &str, schema_text: &str) -> Result<NativeValue, SchemataError> {
        let schema: Schema = schema_text.parse()?;
        let doc: Value = serde_json::from_str(doc_text)?;
        Ok(self.decode(&doc, &schema)?)
    }
}

/// [`Codec::encode`] with the default configuration.
pub fn encode(value: &NativeValue, schema: &Schema) -> Result<Value, CodecError> {
    Codec::default().encode(value, schema)
}

/// [`Codec::decode`] with the default configuration.
pub fn decode(doc: &Value, schema: &Schema) -> Result<NativeValue, CodecError> {
    Codec::default().decode(doc, schema)
}

/// [`Codec::serialize`] with the default configuration.
pub fn serialize(value: &NativeValue, schema_text: &str) -> Result<String, SchemataError> {
    Codec::default().serialize(value, schema_text)
}

/// [`Codec::deserialize`] with the default configuration.
pub fn deserialize(doc_text: &str, schema_text: &str) -> Result<NativeValue, SchemataError> {
    Codec::default().deserialize(doc_text, schema_text)
}
