//! Resolves path segments against an XML element tree.
//!
//! - `Key(name)` selects the first child element named `name`; an `Index(n)`
//!   directly after it selects the n-th sibling of that name instead.
//! - `Index(n)` anywhere else selects the n-th child element.
//! - `@name` selects an attribute value, `#text` the element text.
use crate::ast::PathSegment;
use fuzzmatch_types::{Value, XmlElement};

pub const TEXT_SEGMENT: &str = "#text";
pub const ATTRIBUTE_PREFIX: char = '@';

pub fn select(root: &XmlElement, segments: &[PathSegment]) -> Option<Value> {
    let mut current = root;
    let mut i = 0;
    while i < segments.len() {
        match &segments[i] {
            PathSegment::Key(key) if key == TEXT_SEGMENT => {
                return terminal(segments, i, Value::from(current.text()));
            }
            PathSegment::Key(key) if key.starts_with(ATTRIBUTE_PREFIX) => {
                let value = current.attributes.get(&key[1..])?;
                return terminal(segments, i, Value::from(value.as_str()));
            }
            PathSegment::Key(key) => {
                let position = match segments.get(i + 1) {
                    Some(PathSegment::Index(Some(n))) => {
                        i += 1;
                        *n
                    }
                    _ => 0,
                };
                current = current
                    .child_elements()
                    .filter(|e| e.name == *key)
                    .nth(position)?;
            }
            PathSegment::Index(Some(n)) => {
                current = current.child_elements().nth(*n)?;
            }
            PathSegment::Index(None) => return None,
        }
        i += 1;
    }
    Some(Value::Xml(current.clone()))
}

/// Attribute and text lookups end a path; anything after them does not resolve.
fn terminal(segments: &[PathSegment], i: usize, value: Value) -> Option<Value> {
    (i + 1 == segments.len()).then_some(value)
}
