//! Traversal state shared by the encoder and decoder.

use schemata_core::{AtomKind, CodecError, PathSegment, Schema, SchemaPath};

use crate::config::CodecConfig;

/// Position of the current node plus the configuration in force.
pub(crate) struct Cursor<'c> {
    pub(crate) config: &'c CodecConfig,
    path: SchemaPath,
}

impl<'c> Cursor<'c> {
    pub(crate) fn new(config: &'c CodecConfig) -> Self {
        Self {
            config,
            path: SchemaPath::root(),
        }
    }

    pub(crate) fn here(&self) -> SchemaPath {
        self.path.clone()
    }

    /// Path of element `i` of the list at the current node.
    pub(crate) fn element(&self, i: usize) -> SchemaPath {
        self.path.child(PathSegment::Element(i))
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.path.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.path.pop();
    }

    /// Gate for entering a list or tuple node at the current position.
    pub(crate) fn enter_compound(&self) -> Result<(), CodecError> {
        match self.config.max_depth {
            Some(limit) if self.path.depth() >= limit => Err(CodecError::DepthExceeded {
                path: self.here(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    pub(crate) fn type_mismatch(&self, expected: impl ToString, found: impl Into<String>) -> CodecError {
        CodecError::TypeMismatch {
            path: self.here(),
            expected: expected.to_string(),
            found: found.into(),
        }
    }

    pub(crate) fn unrecognized(&self, schema: &Schema) -> CodecError {
        CodecError::UnrecognizedSchema {
            path: self.here(),
            schema: schema.to_string(),
        }
    }

    pub(crate) fn arity(&self, expected: usize, found: usize) -> CodecError {
        CodecError::ArityMismatch {
            path: self.here(),
            expected,
            found,
        }
    }
}

/// A failure converting one scalar element, before its path is known.
///
/// Bulk vector conversion only materializes a path when an element fails.
#[derive(Debug)]
pub(crate) enum Fault {
    NonFinite(f64),
    NotInteger(String),
    WrongKind { expected: AtomKind, found: String },
}

impl Fault {
    pub(crate) fn at(self, path: SchemaPath) -> CodecError {
        match self {
            Self::NonFinite(value) => CodecError::NonFiniteNumber { path, value },
            Self::NotInteger(number) => CodecError::TypeMismatch {
                path,
                expected: AtomKind::Integer.to_string(),
                found: format!("number {number} not representable as an integer"),
            },
            Self::WrongKind { expected, found } => CodecError::TypeMismatch {
                path,
                expected: expected.to_string(),
                found,
            },
        }
    }
}
