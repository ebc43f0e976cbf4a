//! # Schema Paths
//!
//! A `SchemaPath` locates a node inside a schema/value pair as the trail of
//! list-element and tuple-member indices taken from the root. Every codec
//! error carries one, so a failure deep inside a nested structure names the
//! exact position instead of only a free-text message.

use std::fmt;

/// One step of descent from a compound schema node into a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Element `i` of a homogeneous `List`.
    Element(usize),
    /// Member `i` of a fixed-arity `Tuple`.
    Member(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(i) => write!(f, ".list[{i}]"),
            Self::Member(i) => write!(f, ".tuple[{i}]"),
        }
    }
}

/// Ordered trail of segments from the root schema node.
///
/// Displays as `$` for the root, e.g. `$.tuple[1].list[3]` for the fourth
/// element of the list held in the second tuple member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaPath(Vec<PathSegment>);

impl SchemaPath {
    /// The root path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path extended by `segment`.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    /// Descend into `segment` in place.
    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    /// Step back out of the most recent segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    /// Number of segments, i.e. the nesting depth of the located node.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// RFC 6901 JSON Pointer into a schema *document*.
///
/// Used by schema parse errors, which are reported before any typed
/// `Schema` exists to hang a `SchemaPath` on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaPointer(String);

impl SchemaPointer {
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Returns a new pointer extended by one reference token.
    pub fn child(&self, token: impl fmt::Display) -> Self {
        let escaped = token.to_string().replace('~', "~0").replace('/', "~1");
        Self(format!("{}/{escaped}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_escaping() {
        let pointer = SchemaPointer::root().child("record").child("a/b~c");
        assert_eq!(pointer.as_str(), "/record/a~1b~0c");
        assert_eq!(SchemaPointer::root().to_string(), "(root)");
    }

    #[test]
    fn test_root_display() {
        assert_eq!(SchemaPath::root().to_string(), "$");
        assert!(SchemaPath::root().is_root());
    }

    #[test]
    fn test_nested_display() {
        let path = SchemaPath::root()
            .child(PathSegment::Member(1))
            .child(PathSegment::Element(3));
        assert_eq!(path.to_string(), "$.tuple[1].list[3]");
        assert_eq!(path.depth(), 2);
    }

    #[test]
    fn test_push_pop() {
        let mut path = SchemaPath::root();
        path.push(PathSegment::Element(0));
        path.push(PathSegment::Member(2));
        assert_eq!(path.pop(), Some(PathSegment::Member(2)));
        assert_eq!(path.segments(), &[PathSegment::Element(0)]);
    }

    #[test]
    fn test_child_does_not_mutate_parent() {
        let parent = SchemaPath::root().child(PathSegment::Member(0));
        let _child = parent.child(PathSegment::Element(5));
        assert_eq!(parent.depth(), 1);
    }
}
