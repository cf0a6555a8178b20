//! Defines the parsed form of a path expression.
use crate::error::PathError;
use std::fmt;
use std::str::FromStr;

/// Represents a segment in a path expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A mapping key (e.g., `.name` or `['a.b']`).
    Key(String),
    /// A sequence index (e.g., `[0]`). `None` is the append point `[]`.
    Index(Option<usize>),
}

/// An address within a value tree. No segments denotes the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathExpression {
    segments: Vec<PathSegment>,
}

impl PathExpression {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(Some(index)));
        Self { segments }
    }

    /// The path of the enclosing container, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.segments.split_last().map(|(_, rest)| Self {
            segments: rest.to_vec(),
        })
    }

    pub fn leaf(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// True when the path ends in `[]`, which names a position to append at.
    pub fn ends_with_append(&self) -> bool {
        matches!(self.segments.last(), Some(PathSegment::Index(None)))
    }

    /// The same path with a trailing `[]` removed.
    pub fn without_append(&self) -> Self {
        if self.ends_with_append() {
            self.parent().unwrap_or_default()
        } else {
            self.clone()
        }
    }

    /// The first `len` segments.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '\'', '"']) || key.starts_with('$')
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) if needs_quoting(key) => {
                if key.contains('\'') {
                    write!(f, "[\"{}\"]", key)
                } else {
                    write!(f, "['{}']", key)
                }
            }
            PathSegment::Key(key) => write!(f, ".{}", key),
            PathSegment::Index(Some(i)) => write!(f, "[{}]", i),
            PathSegment::Index(None) => f.write_str("[]"),
        }
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for PathExpression {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_path(s)
    }
}
