use std::fmt;

/// One step of a parsed path: an object member name or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Outcome of walking a path against a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStatus {
    /// Every segment matched; the addressed node exists.
    Found,
    /// An object along the path has no member with the segment's key.
    NotFound,
    /// A segment's kind does not match the node it addresses (key against
    /// an array, index against an object, any segment against a leaf).
    TypeMismatch,
    /// An index segment is past the end of its array.
    IndexOutOfRange,
}

/// Where and how a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub status: ResolveStatus,
    /// Index of the segment the walk stopped at; `segments.len()` when the
    /// whole path matched.
    pub stop_segment: usize,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        self.status == ResolveStatus::Found
    }
}
