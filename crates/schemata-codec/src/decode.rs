//! # Decode: interchange document → native value
//!
//! The document carries no type tags; shape and element type come entirely
//! from the paired schema node.
//!
//! - `Null` yields the absent value whatever the document holds.
//! - `Atom(k)` yields a length-1 vector of kind `k`.
//! - `List(Atom(k))` yields one vector of kind `k`, built in a single pass
//!   over the array rather than one native value per element.
//! - `List(compound)` and `Tuple` yield a generic native list.

use schemata_core::{json_kind, AtomKind, CodecError, NativeValue, PathSegment, Schema};
use serde_json::Value;

use crate::config::IntegerCoercion;
use crate::walk::{Cursor, Fault};

pub(crate) struct Decoder<'c> {
    cursor: Cursor<'c>,
}

impl<'c> Decoder<'c> {
    pub(crate) fn new(cursor: Cursor<'c>) -> Self {
        Self { cursor }
    }

    pub(crate) fn decode(&mut self, doc: &Value, schema: &Schema) -> Result<NativeValue, CodecError> {
        match schema {
            Schema::Null => Ok(NativeValue::Absent),
            Schema::Atom(kind) => self.decode_scalar(doc, *kind),
            Schema::List(element) => {
                self.cursor.enter_compound()?;
                let items = self.expect_array(doc, schema)?;
                match element.as_atom() {
                    Some(kind) => self.decode_vector(items, kind),
                    None => {
                        let mut out = Vec::with_capacity(items.len());
                        for (i, item) in items.iter().enumerate() {
                            self.cursor.push(PathSegment::Element(i));
                            out.push(self.decode(item, element)?);
                            self.cursor.pop();
                        }
                        Ok(NativeValue::List(out))
                    }
                }
            }
            Schema::Tuple(members) => {
                self.cursor.enter_compound()?;
                let items = self.expect_array(doc, schema)?;
                if items.len() != members.len() {
                    return Err(self.cursor.arity(members.len(), items.len()));
                }
                let mut out = Vec::with_capacity(members.len());
                for (i, (item, member)) in items.iter().zip(members).enumerate() {
                    self.cursor.push(PathSegment::Member(i));
                    out.push(self.decode(item, member)?);
                    self.cursor.pop();
                }
                Ok(NativeValue::List(out))
            }
            Schema::Record(_) => Err(self.cursor.unrecognized(schema)),
        }
    }

    fn expect_array<'d>(&self, doc: &'d Value, schema: &Schema) -> Result<&'d [Value], CodecError> {
        match doc {
            Value::Array(items) => Ok(items),
            other => Err(self
                .cursor
                .type_mismatch(format!("array for {schema}"), json_kind(other))),
        }
    }

    fn decode_scalar(&self, doc: &Value, kind: AtomKind) -> Result<NativeValue, CodecError> {
        let coercion = self.cursor.config.integer_coercion;
        let value = match kind {
            AtomKind::Integer => integer_of(doc, coercion).map(|x| NativeValue::Integer(vec![x])),
            AtomKind::Numeric => numeric_of(doc).map(|x| NativeValue::Numeric(vec![x])),
            AtomKind::Logical => logical_of(doc).map(|x| NativeValue::Logical(vec![x])),
            AtomKind::Character => character_of(doc).map(|x| NativeValue::Character(vec![x])),
        };
        value.map_err(|fault| fault.at(self.cursor.here()))
    }

    fn decode_vector(&self, items: &[Value], kind: AtomKind) -> Result<NativeValue, CodecError> {
        let coercion = self.cursor.config.integer_coercion;
        match kind {
            AtomKind::Integer => self
                .collect(items, |doc| integer_of(doc, coercion))
                .map(NativeValue::Integer),
            AtomKind::Numeric => self.collect(items, numeric_of).map(NativeValue::Numeric),
            AtomKind::Logical => self.collect(items, logical_of).map(NativeValue::Logical),
            AtomKind::Character => self.collect(items, character_of).map(NativeValue::Character),
        }
    }

    fn collect<T>(
        &self,
        items: &[Value],
        extract: impl Fn(&Value) -> Result<T, Fault>,
    ) -> Result<Vec<T>, CodecError> {
        items
            .iter()
            .enumerate()
            .map(|(i, doc)| extract(doc).map_err(|fault| fault.at(self.cursor.element(i))))
            .collect()
    }
}

fn wrong_kind(expected: AtomKind, doc: &Value) -> Fault {
    Fault::WrongKind {
        expected,
        found: json_kind(doc).to_string(),
    }
}

fn integer_of(doc: &Value, coercion: IntegerCoercion) -> Result<i32, Fault> {
    let Value::Number(n) = doc else {
        return Err(wrong_kind(AtomKind::Integer, doc));
    };
    if let Some(i) = n.as_i64() {
        return i32::try_from(i).map_err(|_| Fault::NotInteger(n.to_string()));
    }
    n.as_f64()
        .and_then(|x| coercion.apply(x))
        .ok_or_else(|| Fault::NotInteger(n.to_string()))
}

fn numeric_of(doc: &Value) -> Result<f64, Fault> {
    match doc {
        Value::Number(n) => n.as_f64().ok_or_else(|| Fault::WrongKind {
            expected: AtomKind::Numeric,
            found: format!("number {n} outside the floating range"),
        }),
        other => Err(wrong_kind(AtomKind::Numeric, other)),
    }
}

fn logical_of(doc: &Value) -> Result<bool, Fault> {
    doc.as_bool().ok_or_else(|| wrong_kind(AtomKind::Logical, doc))
}

fn character_of(doc: &Value) -> Result<String, Fault> {
    doc.as_str()
        .map(str::to_string)
        .ok_or_else(|| wrong_kind(AtomKind::Character, doc))
}
