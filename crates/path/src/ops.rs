//! Reading and mutating a value tree through a [`PathExpression`].
use crate::ast::{PathExpression, PathSegment};
use crate::error::PathError;
use crate::xml;
use fuzzmatch_types::{Kind, Value};
use std::borrow::Cow;

/// How far past the end of a sequence `set` may write; the gap is padded with
/// nulls.
pub const MAX_INDEX_GAP: usize = 1 << 16;

/// Resolves a path. Lookups that cross into an XML element go through the XML
/// adapter and return an owned value; everything else is borrowed.
pub fn get<'a>(root: &'a Value, path: &PathExpression) -> Option<Cow<'a, Value>> {
    let mut current = root;
    for (i, segment) in path.segments().iter().enumerate() {
        current = match (current, segment) {
            (Value::Xml(element), _) => {
                return xml::select(element, &path.segments()[i..]).map(Cow::Owned);
            }
            (Value::Mapping(map), PathSegment::Key(key)) => map.get(key)?,
            (Value::Sequence(items), PathSegment::Index(Some(index))) => items.get(*index)?,
            _ => return None,
        };
    }
    Some(Cow::Borrowed(current))
}

/// Mutable lookup for JSON-like trees. Never creates anything.
pub fn get_mut<'a>(root: &'a mut Value, path: &PathExpression) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match (current, segment) {
            (Value::Mapping(map), PathSegment::Key(key)) => map.get_mut(key)?,
            (Value::Sequence(items), PathSegment::Index(Some(index))) => items.get_mut(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

/// True when the path resolves. A trailing `[]` is ignored, since an append
/// point never names an existing element.
pub fn exists(root: &Value, path: &PathExpression) -> bool {
    get(root, &path.without_append()).is_some()
}

/// Writes `value` at `path`, creating missing intermediate containers.
///
/// A missing (or null) location becomes a mapping when the segment addressing
/// into it is a key, and a sequence when it is an index; sequences are padded
/// with nulls up to the requested index. A trailing `[]` appends, a numeric
/// index replaces in place. An index more than [`MAX_INDEX_GAP`] past the end
/// of its sequence is an `InvalidPath`.
pub fn set(root: &mut Value, path: &PathExpression, value: Value) -> Result<(), PathError> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(PathError::RootPath);
    };
    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        current = child_slot(current, segment, &path.prefix(depth))?;
    }
    let slot = child_slot(current, last, &path.prefix(parents.len()))?;
    *slot = value;
    Ok(())
}

/// Removes the value at `path` and returns it. Removing a path that does not
/// exist is a successful no-op.
pub fn remove(root: &mut Value, path: &PathExpression) -> Result<Option<Value>, PathError> {
    let Some((last, _)) = path.segments().split_last() else {
        return Err(PathError::RootPath);
    };
    let parent_path = path.parent().unwrap_or_default();
    if let Some(kind) = crossed_read_only(root, &parent_path) {
        return Err(PathError::UnsupportedTarget {
            path: path.to_string(),
            kind,
        });
    }
    let Some(parent) = get_mut(root, &parent_path) else {
        return Ok(None);
    };
    let removed = match (parent, last) {
        (Value::Mapping(map), PathSegment::Key(key)) => map.shift_remove(key),
        (Value::Sequence(items), PathSegment::Index(Some(index))) if *index < items.len() => {
            Some(items.remove(*index))
        }
        (Value::Xml(_), _) => {
            return Err(PathError::UnsupportedTarget {
                path: path.to_string(),
                kind: Kind::Xml,
            });
        }
        _ => None,
    };
    Ok(removed)
}

/// Returns the slot addressed by `segment` inside `current`, creating the
/// container and the slot when they are missing.
fn child_slot<'a>(
    current: &'a mut Value,
    segment: &PathSegment,
    at: &PathExpression,
) -> Result<&'a mut Value, PathError> {
    if current.is_null() {
        *current = match segment {
            PathSegment::Key(_) => Value::empty_mapping(),
            PathSegment::Index(_) => Value::empty_sequence(),
        };
    }
    match (current, segment) {
        (Value::Mapping(map), PathSegment::Key(key)) => {
            Ok(map.entry(key.clone()).or_insert(Value::Null))
        }
        (Value::Sequence(items), PathSegment::Index(Some(index))) => {
            let index = *index;
            if index >= items.len() {
                if index - items.len() > MAX_INDEX_GAP {
                    return Err(PathError::invalid(
                        at.child_index(index).to_string(),
                        format!("index {} out of range for length {}", index, items.len()),
                    ));
                }
                items.resize(index + 1, Value::Null);
            }
            Ok(&mut items[index])
        }
        (Value::Sequence(items), PathSegment::Index(None)) => {
            items.push(Value::Null);
            let last = items.len() - 1;
            Ok(&mut items[last])
        }
        (Value::Xml(_), _) => Err(PathError::UnsupportedTarget {
            path: at.to_string(),
            kind: Kind::Xml,
        }),
        (other, _) => Err(PathError::NotAContainer {
            path: at.to_string(),
            found: other.kind(),
        }),
    }
}

/// The kind of the first read-only node met while walking `path`, if any.
fn crossed_read_only(root: &Value, path: &PathExpression) -> Option<Kind> {
    let mut current = root;
    for segment in path.segments() {
        current = match (current, segment) {
            (Value::Xml(_), _) => return Some(Kind::Xml),
            (Value::Mapping(map), PathSegment::Key(key)) => map.get(key)?,
            (Value::Sequence(items), PathSegment::Index(Some(index))) => items.get(*index)?,
            _ => return None,
        };
    }
    None
}
