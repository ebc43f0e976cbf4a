//! # Schema Model
//!
//! The recursive type description consumed by both directions of the codec.
//!
//! ## Canonical Text Form
//!
//! ```text
//! schema := "integer" | "numeric" | "logical" | "character" | null
//!         | {"list": [schema]}
//!         | {"tuple": [schema, ...]}
//!         | {"record": {name: schema, ...}}     (reserved)
//! ```
//!
//! Schema text is parsed exactly once into the typed [`Schema`] tree. The
//! codec then recurses over that tree and never re-inspects untyped JSON.
//!
//! ## Invariants
//!
//! - A `Schema` is immutable once constructed and shared read-only by any
//!   number of conversions.
//! - Equality is structural.
//! - `Record` is representable but the codec rejects it in both directions.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::path::SchemaPointer;

const LIST_KEY: &str = "list";
const TUPLE_KEY: &str = "tuple";
const RECORD_KEY: &str = "record";

/// Scalar leaf types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomKind {
    /// 32-bit signed integer.
    Integer,
    /// 64-bit floating point.
    Numeric,
    /// Boolean.
    Logical,
    /// UTF-8 string.
    Character,
}

impl AtomKind {
    /// All atom kinds in canonical order.
    pub fn all() -> &'static [AtomKind] {
        &[Self::Integer, Self::Numeric, Self::Logical, Self::Character]
    }

    /// The literal name used in schema text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Numeric => "numeric",
            Self::Logical => "logical",
            Self::Character => "character",
        }
    }

    /// Look up an atom kind by its schema-text name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AtomKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| SchemaError::UnknownAtom {
            pointer: SchemaPointer::root(),
            name: s.to_string(),
        })
    }
}

/// A node of the recursive schema tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Schema {
    /// Matches only the absence of a value.
    Null,
    /// A scalar leaf.
    Atom(AtomKind),
    /// Homogeneous sequence of arbitrary length.
    List(Box<Schema>),
    /// Heterogeneous sequence of fixed length.
    Tuple(Vec<Schema>),
    /// Named fields. Reserved: no codec support.
    Record(BTreeMap<String, Schema>),
}

impl Schema {
    pub fn atom(kind: AtomKind) -> Self {
        Self::Atom(kind)
    }

    pub fn integer() -> Self {
        Self::atom(AtomKind::Integer)
    }

    pub fn numeric() -> Self {
        Self::atom(AtomKind::Numeric)
    }

    pub fn logical() -> Self {
        Self::atom(AtomKind::Logical)
    }

    pub fn character() -> Self {
        Self::atom(AtomKind::Character)
    }

    /// A list whose every element conforms to `element`.
    pub fn list(element: Schema) -> Self {
        Self::List(Box::new(element))
    }

    /// A tuple whose position `i` conforms to the `i`-th member.
    pub fn tuple(members: impl IntoIterator<Item = Schema>) -> Self {
        Self::Tuple(members.into_iter().collect())
    }

    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Schema)>) -> Self {
        Self::Record(
            fields
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
        )
    }

    /// The atom kind, if this is an atom.
    pub fn as_atom(&self) -> Option<AtomKind> {
        match self {
            Self::Atom(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Self::Atom(_))
    }

    /// Short name of the node's constructor, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Atom(kind) => kind.as_str(),
            Self::List(_) => LIST_KEY,
            Self::Tuple(_) => TUPLE_KEY,
            Self::Record(_) => RECORD_KEY,
        }
    }

    /// Nesting depth: leaves are 0, each compound level adds 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Null | Self::Atom(_) => 0,
            Self::List(element) => 1 + element.depth(),
            Self::Tuple(members) => 1 + members.iter().map(Schema::depth).max().unwrap_or(0),
            Self::Record(fields) => 1 + fields.values().map(Schema::depth).max().unwrap_or(0),
        }
    }

    /// The canonical document form of this schema.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Atom(kind) => Value::String(kind.as_str().to_string()),
            Self::List(element) => tagged(LIST_KEY, Value::Array(vec![element.to_value()])),
            Self::Tuple(members) => tagged(
                TUPLE_KEY,
                Value::Array(members.iter().map(Schema::to_value).collect()),
            ),
            Self::Record(fields) => tagged(
                RECORD_KEY,
                Value::Object(
                    fields
                        .iter()
                        .map(|(name, schema)| (name.clone(), schema.to_value()))
                        .collect(),
                ),
            ),
        }
    }

    /// Parse a schema document into the typed tree.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownAtom` for an atom name outside the four
    /// kinds and `SchemaError::Malformed` for anything else off-grammar. Both
    /// carry a JSON Pointer to the offending node.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        parse_node(value, &SchemaPointer::root())
    }
}

impl From<AtomKind> for Schema {
    fn from(kind: AtomKind) -> Self {
        Self::atom(kind)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl FromStr for Schema {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn tagged(key: &str, body: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), body);
    Value::Object(map)
}

/// Name of a document node's JSON kind, used in diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_node(value: &Value, pointer: &SchemaPointer) -> Result<Schema, SchemaError> {
    match value {
        Value::Null => Ok(Schema::Null),
        Value::String(name) => {
            AtomKind::from_name(name)
                .map(Schema::atom)
                .ok_or_else(|| SchemaError::UnknownAtom {
                    pointer: pointer.clone(),
                    name: name.clone(),
                })
        }
        Value::Object(map) => parse_compound(map, pointer),
        other => Err(SchemaError::malformed(
            pointer,
            format!(
                "expected an atom name, null, or a list/tuple/record object; found {}",
                json_kind(other)
            ),
        )),
    }
}

fn parse_compound(map: &Map<String, Value>, pointer: &SchemaPointer) -> Result<Schema, SchemaError> {
    let mut entries = map.iter();
    let (key, body) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(SchemaError::malformed(
                pointer,
                format!(
                    "expected exactly one of \"list\", \"tuple\" or \"record\"; found {} keys",
                    map.len()
                ),
            ))
        }
    };
    let at = pointer.child(key);

    match key.as_str() {
        LIST_KEY => {
            let items = expect_array(body, &at)?;
            let (first, rest) = items
                .split_first()
                .ok_or_else(|| SchemaError::malformed(&at, "list schema must name an element type"))?;
            if !rest.is_empty() {
                tracing::warn!(
                    pointer = %at,
                    ignored = rest.len(),
                    "list schema names more than one element type; only the first is used"
                );
            }
            let element = parse_node(first, &at.child(0))?;
            Ok(Schema::List(Box::new(element)))
        }
        TUPLE_KEY => {
            let members = expect_array(body, &at)?
                .iter()
                .enumerate()
                .map(|(i, member)| parse_node(member, &at.child(i)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Schema::Tuple(members))
        }
        RECORD_KEY => {
            let Value::Object(fields) = body else {
                return Err(SchemaError::malformed(
                    &at,
                    format!("record schema must be an object; found {}", json_kind(body)),
                ));
            };
            let fields = fields
                .iter()
                .map(|(name, field)| {
                    parse_node(field, &at.child(name)).map(|schema| (name.clone(), schema))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()?;
            Ok(Schema::Record(fields))
        }
        other => Err(SchemaError::malformed(
            pointer,
            format!("unknown schema constructor \"{other}\""),
        )),
    }
}

fn expect_array<'v>(body: &'v Value, pointer: &SchemaPointer) -> Result<&'v [Value], SchemaError> {
    match body {
        Value::Array(items) => Ok(items),
        other => Err(SchemaError::malformed(
            pointer,
            format!("expected an array; found {}", json_kind(other)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Schema {
        text.parse().expect("schema should parse")
    }

    #[test]
    fn test_atoms_parse() {
        assert_eq!(parse(r#""integer""#), Schema::integer());
        assert_eq!(parse(r#""numeric""#), Schema::numeric());
        assert_eq!(parse(r#""logical""#), Schema::logical());
        assert_eq!(parse(r#""character""#), Schema::character());
        assert_eq!(parse("null"), Schema::Null);
    }

    #[test]
    fn test_atom_matchers() {
        for &kind in AtomKind::all() {
            let schema = Schema::atom(kind);
            assert!(schema.is_atom());
            assert_eq!(schema.as_atom(), Some(kind));
            assert_eq!(Schema::from(kind), schema);
        }
        for schema in [
            Schema::Null,
            Schema::list(Schema::integer()),
            Schema::tuple([Schema::logical()]),
            Schema::record([("x", Schema::numeric())]),
        ] {
            assert!(!schema.is_atom());
            assert_eq!(schema.as_atom(), None);
        }
    }

    #[test]
    fn test_nested_parse() {
        let schema = parse(r#"{"tuple": ["integer", {"list": ["character"]}]}"#);
        assert_eq!(
            schema,
            Schema::tuple([Schema::integer(), Schema::list(Schema::character())])
        );
        assert_eq!(schema.depth(), 2);
    }

    #[test]
    fn test_canonical_display() {
        let schema = Schema::tuple([Schema::Null, Schema::list(Schema::numeric())]);
        assert_eq!(schema.to_string(), r#"{"tuple":[null,{"list":["numeric"]}]}"#);
    }

    #[test]
    fn test_display_parses_back() {
        let schema = Schema::list(Schema::tuple([
            Schema::logical(),
            Schema::list(Schema::list(Schema::integer())),
        ]));
        assert_eq!(parse(&schema.to_string()), schema);
    }

    #[test]
    fn test_empty_tuple_allowed() {
        assert_eq!(parse(r#"{"tuple": []}"#), Schema::Tuple(vec![]));
    }

    #[test]
    fn test_record_parses_into_model() {
        let schema = parse(r#"{"record": {"x": "numeric", "y": "numeric"}}"#);
        assert_eq!(
            schema,
            Schema::record([("x", Schema::numeric()), ("y", Schema::numeric())])
        );
        assert_eq!(schema.kind_name(), "record");
        assert_eq!(schema.to_string(), r#"{"record":{"x":"numeric","y":"numeric"}}"#);
    }

    #[test]
    fn test_list_uses_first_element_type() {
        let schema = parse(r#"{"list": ["integer", "character"]}"#);
        assert_eq!(schema, Schema::list(Schema::integer()));
    }

    #[test]
    fn test_unknown_atom_reports_pointer() {
        let err = r#"{"tuple": ["integer", {"list": ["complex"]}]}"#
            .parse::<Schema>()
            .unwrap_err();
        match err {
            SchemaError::UnknownAtom { pointer, name } => {
                assert_eq!(name, "complex");
                assert_eq!(pointer.as_str(), "/tuple/1/list/0");
            }
            other => panic!("Expected UnknownAtom, got: {other}"),
        }
    }

    #[test]
    fn test_empty_list_rejected() {
        let err = r#"{"list": []}"#.parse::<Schema>().unwrap_err();
        assert!(matches!(err, SchemaError::Malformed { .. }));
    }

    #[test]
    fn test_ambiguous_object_rejected() {
        let err = r#"{"list": ["integer"], "tuple": []}"#.parse::<Schema>().unwrap_err();
        assert!(matches!(err, SchemaError::Malformed { .. }));
        assert!(err.to_string().contains("found 2 keys"));
    }

    #[test]
    fn test_unknown_constructor_rejected() {
        let err = r#"{"map": ["integer"]}"#.parse::<Schema>().unwrap_err();
        assert!(err.to_string().contains("unknown schema constructor \"map\""));
    }

    #[test]
    fn test_scalar_json_rejected() {
        for text in ["1", "true", r#"["integer"]"#] {
            let err = text.parse::<Schema>().unwrap_err();
            assert!(matches!(err, SchemaError::Malformed { .. }), "{text}");
        }
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = "{not json".parse::<Schema>().unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let schema = Schema::list(Schema::tuple([Schema::integer(), Schema::Null]));
        let text = serde_json::to_string(&schema).unwrap();
        let back: Schema = serde_json::from_str(&text).unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn test_serde_rejects_unknown_atom() {
        let result: Result<Schema, _> = serde_json::from_str(r#""double""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_atom_kind_names() {
        for kind in AtomKind::all() {
            assert_eq!(kind.as_str().parse::<AtomKind>().unwrap(), *kind);
            assert_eq!(Schema::from(*kind).as_atom(), Some(*kind));
        }
        assert!("string".parse::<AtomKind>().is_err());
    }
}
