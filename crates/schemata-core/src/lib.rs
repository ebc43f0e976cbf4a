//! # schemata-core — Foundational Types
//!
//! This crate is the leaf of the schemata workspace. It defines the schema
//! model that drives conversion, the native value representation the codec
//! reads from and writes to, and the structured error hierarchy.
//!
//! ## Key Design Principles
//!
//! 1. **Typed schema, parsed once.** Schema text is parsed into the closed
//!    [`Schema`] sum type before any conversion begins. The codec never
//!    re-inspects untyped JSON to decide what a schema means.
//!
//! 2. **Closed native value union.** [`NativeValue`] has one variant per
//!    runtime kind the codec understands, plus `Unsupported`. Every `match`
//!    is exhaustive.
//!
//! 3. **Structured errors with paths.** Every codec failure names the
//!    [`SchemaPath`] of the offending node. Schema text failures carry a
//!    JSON Pointer into the schema document.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `schemata-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod native;
pub mod path;
pub mod schema;

// Re-export primary types for ergonomic imports.
pub use error::{CodecError, ErrorKind, SchemaError, SchemataError};
pub use native::{NativeType, NativeValue, OpaqueKind};
pub use path::{PathSegment, SchemaPath, SchemaPointer};
pub use schema::{json_kind, AtomKind, Schema};
