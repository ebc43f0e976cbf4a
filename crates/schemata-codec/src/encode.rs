//! # Encode: native value → interchange document
//!
//! Dispatches on the native value's variant and cross-checks it against the
//! schema node. The schema's shape, never the vector's length, decides
//! between a bare scalar node (`Atom`) and an array (`List`):
//!
//! | value | `Atom(k)` | `List(Atom(k))` |
//! |-------|-----------|-----------------|
//! | length-1 vector | scalar | one-element array |
//! | length-n vector, n ≠ 1 | `ScalarLength` error | n-element array |
//!
//! Compound native lists follow the `Tuple`/`List` schema position by position.

use schemata_core::{AtomKind, CodecError, NativeType, NativeValue, PathSegment, Schema};
use serde_json::{Number, Value};

use crate::config::IntegerCoercion;
use crate::walk::{Cursor, Fault};

/// How a vector-shaped schema node wants its vector.
#[derive(Debug, Clone, Copy)]
enum Shape {
    Scalar(AtomKind),
    Vector(AtomKind),
}

impl Shape {
    fn of(schema: &Schema) -> Option<Self> {
        match schema {
            Schema::Atom(kind) => Some(Self::Scalar(*kind)),
            Schema::List(element) => element.as_atom().map(Self::Vector),
            _ => None,
        }
    }

    fn kind(self) -> AtomKind {
        match self {
            Self::Scalar(kind) | Self::Vector(kind) => kind,
        }
    }
}

pub(crate) struct Encoder<'c> {
    cursor: Cursor<'c>,
}

impl<'c> Encoder<'c> {
    pub(crate) fn new(cursor: Cursor<'c>) -> Self {
        Self { cursor }
    }

    pub(crate) fn encode(&mut self, value: &NativeValue, schema: &Schema) -> Result<Value, CodecError> {
        let coercion = self.cursor.config.integer_coercion;
        match value {
            NativeValue::Absent => Ok(Value::Null),
            NativeValue::Numeric(xs) => self.encode_vector(
                xs,
                value,
                schema,
                &[AtomKind::Integer, AtomKind::Numeric],
                |&x, kind| numeric_node(x, kind, coercion),
            ),
            NativeValue::Integer(xs) => self.encode_vector(
                xs,
                value,
                schema,
                &[AtomKind::Integer, AtomKind::Numeric],
                |&x, _| Ok(Value::from(x)),
            ),
            NativeValue::Logical(xs) => {
                self.encode_vector(xs, value, schema, &[AtomKind::Logical], |&x, _| {
                    Ok(Value::Bool(x))
                })
            }
            NativeValue::Character(xs) => {
                self.encode_vector(xs, value, schema, &[AtomKind::Character], |x, _| {
                    Ok(Value::String(x.clone()))
                })
            }
            NativeValue::List(items) => self.encode_list(items, schema),
            NativeValue::Unsupported(kind) => {
                tracing::debug!(path = %self.cursor.here(), native = %kind, "no encoding rule for native type");
                Err(CodecError::UnsupportedNativeType {
                    path: self.cursor.here(),
                    native: NativeType::Opaque(*kind),
                })
            }
        }
    }

    /// Encode a homogeneous vector under an `Atom` or `List(Atom)` node
    /// whose kind is one of `accepts`.
    fn encode_vector<T>(
        &self,
        xs: &[T],
        value: &NativeValue,
        schema: &Schema,
        accepts: &[AtomKind],
        node: impl Fn(&T, AtomKind) -> Result<Value, Fault>,
    ) -> Result<Value, CodecError> {
        if let Schema::Record(_) = schema {
            return Err(self.cursor.unrecognized(schema));
        }
        let shape = match Shape::of(schema) {
            Some(shape) if accepts.contains(&shape.kind()) => shape,
            _ => return Err(self.cursor.type_mismatch(schema, value.describe())),
        };

        match shape {
            Shape::Scalar(kind) => {
                let [x] = xs else {
                    return Err(CodecError::ScalarLength {
                        path: self.cursor.here(),
                        kind,
                        found: xs.len(),
                    });
                };
                node(x, kind).map_err(|fault| fault.at(self.cursor.here()))
            }
            Shape::Vector(kind) => {
                self.cursor.enter_compound()?;
                xs.iter()
                    .enumerate()
                    .map(|(i, x)| node(x, kind).map_err(|fault| fault.at(self.cursor.element(i))))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
        }
    }

    fn encode_list(&mut self, items: &[NativeValue], schema: &Schema) -> Result<Value, CodecError> {
        match schema {
            Schema::Tuple(members) => {
                self.cursor.enter_compound()?;
                if items.len() != members.len() {
                    return Err(self.cursor.arity(members.len(), items.len()));
                }
                let mut out = Vec::with_capacity(members.len());
                for (i, (item, member)) in items.iter().zip(members).enumerate() {
                    self.cursor.push(PathSegment::Member(i));
                    out.push(self.encode(item, member)?);
                    self.cursor.pop();
                }
                Ok(Value::Array(out))
            }
            Schema::List(element) => {
                self.cursor.enter_compound()?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    self.cursor.push(PathSegment::Element(i));
                    out.push(self.encode(item, element)?);
                    self.cursor.pop();
                }
                Ok(Value::Array(out))
            }
            Schema::Record(_) => Err(self.cursor.unrecognized(schema)),
            Schema::Null | Schema::Atom(_) => Err(self
                .cursor
                .type_mismatch(schema, format!("list of length {}", items.len()))),
        }
    }
}

fn numeric_node(x: f64, kind: AtomKind, coercion: IntegerCoercion) -> Result<Value, Fault> {
    if !x.is_finite() {
        return Err(Fault::NonFinite(x));
    }
    match kind {
        AtomKind::Integer => coercion
            .apply(x)
            .map(Value::from)
            .ok_or_else(|| Fault::NotInteger(x.to_string())),
        _ => Number::from_f64(x)
            .map(Value::Number)
            .ok_or(Fault::NonFinite(x)),
    }
}
