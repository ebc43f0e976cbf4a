//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout schemata. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Schema text errors carry a JSON Pointer into the schema document.
//! - Codec errors carry the `SchemaPath` of the offending node and the
//!   expected vs actual shape. A failure at any depth aborts the whole
//!   conversion; there are no partial results.
//! - Nothing is reported only to a console. Diagnostics go to `tracing`,
//!   failures go to the caller.

use thiserror::Error;

use crate::native::NativeType;
use crate::path::{SchemaPath, SchemaPointer};
use crate::schema::AtomKind;

/// Top-level error type for the text entry points (`serialize`/`deserialize`).
#[derive(Error, Debug)]
pub enum SchemataError {
    /// The schema text could not be parsed into a `Schema`.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The interchange document text is not valid JSON.
    #[error("document error: {0}")]
    Document(#[from] serde_json::Error),

    /// Conversion failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Error while parsing schema text into the typed schema model.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A string in atom position is not one of the four atom kinds.
    #[error("unrecognized atom kind '{name}' at {pointer}; expected one of integer, numeric, logical, character")]
    UnknownAtom {
        /// Location of the offending string in the schema document.
        pointer: SchemaPointer,
        /// The unrecognized name.
        name: String,
    },

    /// The schema document does not follow the schema grammar.
    #[error("malformed schema at {pointer}: {reason}")]
    Malformed {
        /// Location of the offending node in the schema document.
        pointer: SchemaPointer,
        /// What was expected there.
        reason: String,
    },

    /// The schema text is not valid JSON.
    #[error("schema text is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub(crate) fn malformed(pointer: &SchemaPointer, reason: impl Into<String>) -> Self {
        Self::Malformed {
            pointer: pointer.clone(),
            reason: reason.into(),
        }
    }
}

/// Coarse classification of codec failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A native runtime type with no encoding rule.
    UnsupportedNativeType,
    /// A schema the codec does not implement (`Record`).
    UnrecognizedSchema,
    /// Length disagreement: tuple arity, or a non-scalar under an atom schema.
    ArityMismatch,
    /// Value or document kind disagrees with the schema.
    TypeMismatch,
    /// The configured nesting limit was reached.
    DepthExceeded,
}

/// Error during `encode` or `decode`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Encode met a native runtime type with no encoding rule.
    #[error("cannot encode native value of type {native} at {path}")]
    UnsupportedNativeType {
        /// Location of the value.
        path: SchemaPath,
        /// The runtime type encountered.
        native: NativeType,
    },

    /// The schema node is declared in the model but not implemented.
    #[error("unrecognized schema at {path}: {schema} is not implemented")]
    UnrecognizedSchema {
        /// Location of the schema node.
        path: SchemaPath,
        /// Canonical text of the schema node.
        schema: String,
    },

    /// A tuple's member count disagrees with the value or document length.
    #[error("arity mismatch at {path}: tuple declares {expected} members, found {found}")]
    ArityMismatch {
        /// Location of the tuple.
        path: SchemaPath,
        /// Number of members declared by the schema.
        expected: usize,
        /// Length of the value or document.
        found: usize,
    },

    /// A vector under an atom schema does not hold exactly one element.
    #[error("expected a single {kind} at {path}, found a vector of length {found}")]
    ScalarLength {
        /// Location of the atom.
        path: SchemaPath,
        /// The atom kind declared by the schema.
        kind: AtomKind,
        /// Actual vector length.
        found: usize,
    },

    /// The value or document kind disagrees with the schema.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Location of the node.
        path: SchemaPath,
        /// What the schema requires here.
        expected: String,
        /// What was actually present.
        found: String,
    },

    /// NaN and infinities have no interchange representation.
    #[error("non-finite number {value} at {path} cannot be encoded")]
    NonFiniteNumber {
        /// Location of the element.
        path: SchemaPath,
        /// The offending value.
        value: f64,
    },

    /// Nesting went past the configured limit.
    #[error("nesting depth limit of {limit} exceeded at {path}")]
    DepthExceeded {
        /// Location of the first node past the limit.
        path: SchemaPath,
        /// The configured limit.
        limit: usize,
    },
}

impl CodecError {
    /// The coarse kind of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedNativeType { .. } => ErrorKind::UnsupportedNativeType,
            Self::UnrecognizedSchema { .. } => ErrorKind::UnrecognizedSchema,
            Self::ArityMismatch { .. } | Self::ScalarLength { .. } => ErrorKind::ArityMismatch,
            Self::TypeMismatch { .. } | Self::NonFiniteNumber { .. } => ErrorKind::TypeMismatch,
            Self::DepthExceeded { .. } => ErrorKind::DepthExceeded,
        }
    }

    /// Location of the offending node.
    pub fn path(&self) -> &SchemaPath {
        match self {
            Self::UnsupportedNativeType { path, .. }
            | Self::UnrecognizedSchema { path, .. }
            | Self::ArityMismatch { path, .. }
            | Self::ScalarLength { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::NonFiniteNumber { path, .. }
            | Self::DepthExceeded { path, .. } => path,
        }
    }
}
