//! # Native Values
//!
//! The host runtime's typed values as seen by the codec: absent, one of four
//! homogeneous vectors, a generic heterogeneous list, or an opaque runtime
//! object with no encoding rule.
//!
//! A length-1 vector is indistinguishable from the scalar it holds. The
//! codec never guesses between the two; the paired `Schema` decides.
//!
//! Every `match` on `NativeValue` is exhaustive, so a new native kind forces
//! every consumer to handle it at compile time.

use std::fmt;

/// Host runtime objects the codec has no rule for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpaqueKind {
    Symbol,
    Closure,
    Environment,
    Complex,
    Raw,
    ExternalPointer,
    /// Any other runtime type.
    Other,
}

impl OpaqueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symbol => "symbol",
            Self::Closure => "closure",
            Self::Environment => "environment",
            Self::Complex => "complex",
            Self::Raw => "raw",
            Self::ExternalPointer => "external pointer",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for OpaqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime type tag of a `NativeValue`, carried by errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    Absent,
    Integer,
    Numeric,
    Logical,
    Character,
    List,
    Opaque(OpaqueKind),
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("absent"),
            Self::Integer => f.write_str("integer vector"),
            Self::Numeric => f.write_str("numeric vector"),
            Self::Logical => f.write_str("logical vector"),
            Self::Character => f.write_str("character vector"),
            Self::List => f.write_str("list"),
            Self::Opaque(kind) => write!(f, "{kind}"),
        }
    }
}

/// A host runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    /// The runtime's "no value" marker.
    Absent,
    Integer(Vec<i32>),
    Numeric(Vec<f64>),
    Logical(Vec<bool>),
    Character(Vec<String>),
    /// Generic heterogeneous ordered sequence.
    List(Vec<NativeValue>),
    /// A runtime object with no encoding rule.
    Unsupported(OpaqueKind),
}

impl NativeValue {
    /// A length-1 integer vector.
    pub fn integer(value: i32) -> Self {
        Self::Integer(vec![value])
    }

    /// A length-1 numeric vector.
    pub fn numeric(value: f64) -> Self {
        Self::Numeric(vec![value])
    }

    /// A length-1 logical vector.
    pub fn logical(value: bool) -> Self {
        Self::Logical(vec![value])
    }

    /// A length-1 character vector.
    pub fn character(value: impl Into<String>) -> Self {
        Self::Character(vec![value.into()])
    }

    pub fn list(items: impl IntoIterator<Item = NativeValue>) -> Self {
        Self::List(items.into_iter().collect())
    }

    pub fn native_type(&self) -> NativeType {
        match self {
            Self::Absent => NativeType::Absent,
            Self::Integer(_) => NativeType::Integer,
            Self::Numeric(_) => NativeType::Numeric,
            Self::Logical(_) => NativeType::Logical,
            Self::Character(_) => NativeType::Character,
            Self::List(_) => NativeType::List,
            Self::Unsupported(kind) => NativeType::Opaque(*kind),
        }
    }

    /// Number of elements. Absent and opaque values have none.
    pub fn len(&self) -> usize {
        match self {
            Self::Absent | Self::Unsupported(_) => 0,
            Self::Integer(xs) => xs.len(),
            Self::Numeric(xs) => xs.len(),
            Self::Logical(xs) => xs.len(),
            Self::Character(xs) => xs.len(),
            Self::List(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Type and length, e.g. `numeric vector of length 3`. Used in mismatch errors.
    pub fn describe(&self) -> String {
        match self {
            Self::Absent | Self::Unsupported(_) => self.native_type().to_string(),
            _ => format!("{} of length {}", self.native_type(), self.len()),
        }
    }
}

impl From<Vec<i32>> for NativeValue {
    fn from(xs: Vec<i32>) -> Self {
        Self::Integer(xs)
    }
}

impl From<Vec<f64>> for NativeValue {
    fn from(xs: Vec<f64>) -> Self {
        Self::Numeric(xs)
    }
}

impl From<Vec<bool>> for NativeValue {
    fn from(xs: Vec<bool>) -> Self {
        Self::Logical(xs)
    }
}

impl From<Vec<String>> for NativeValue {
    fn from(xs: Vec<String>) -> Self {
        Self::Character(xs)
    }
}

impl From<Vec<&str>> for NativeValue {
    fn from(xs: Vec<&str>) -> Self {
        Self::Character(xs.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<NativeValue>> for NativeValue {
    fn from(items: Vec<NativeValue>) -> Self {
        Self::List(items)
    }
}

impl From<i32> for NativeValue {
    fn from(x: i32) -> Self {
        Self::integer(x)
    }
}

impl From<f64> for NativeValue {
    fn from(x: f64) -> Self {
        Self::numeric(x)
    }
}

impl From<bool> for NativeValue {
    fn from(x: bool) -> Self {
        Self::logical(x)
    }
}

impl From<&str> for NativeValue {
    fn from(x: &str) -> Self {
        Self::character(x)
    }
}

impl From<String> for NativeValue {
    fn from(x: String) -> Self {
        Self::Character(vec![x])
    }
}

fn write_vector<T>(
    f: &mut fmt::Formatter<'_>,
    tag: &str,
    xs: &[T],
    item: impl Fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    write!(f, "{tag}[")?;
    for (i, x) in xs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item(f, x)?;
    }
    f.write_str("]")
}

/// Compact notation: `int[1, 2]`, `num[1.5]`, `lgl[true]`, `chr["a"]`,
/// `list(int[1], NULL)`, `NULL`, `<closure>`.
impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("NULL"),
            Self::Integer(xs) => write_vector(f, "int", xs, |f, x| write!(f, "{x}")),
            Self::Numeric(xs) => write_vector(f, "num", xs, |f, x| write!(f, "{x}")),
            Self::Logical(xs) => write_vector(f, "lgl", xs, |f, x| write!(f, "{x}")),
            Self::Character(xs) => write_vector(f, "chr", xs, |f, x| write!(f, "{x:?}")),
            Self::List(items) => {
                f.write_str("list(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::Unsupported(kind) => write!(f, "<{kind}>"),
        }
    }
}
