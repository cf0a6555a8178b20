//! Key-order canonicalization for diagnostics.
//!
//! Reordering only changes how a document prints. Comparisons never look at
//! key order.
use fuzzmatch_types::{Mapping, Value};

/// Returns `source` with its keys ordered like `reference`: keys that appear in
/// `reference` first, in its order, then the rest of `source` in their original
/// order. The result holds exactly the entries of `source`.
pub fn reorder_like(source: &Mapping, reference: &Mapping) -> Mapping {
    let mut result = Mapping::with_capacity(source.len());
    for key in reference.keys() {
        if let Some(value) = source.get(key) {
            result.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in source {
        if !result.contains_key(key) {
            result.insert(key.clone(), value.clone());
        }
    }
    result
}

/// Like [`reorder_like`], applied at every level where both sides hold a
/// mapping under the same key. Anything else is returned unchanged.
pub fn reorder_value_like(source: &Value, reference: &Value) -> Value {
    match (source, reference) {
        (Value::Mapping(src), Value::Mapping(reference)) => {
            let ordered = reorder_like(src, reference);
            Value::Mapping(
                ordered
                    .into_iter()
                    .map(|(key, value)| {
                        let value = match reference.get(&key) {
                            Some(r) => reorder_value_like(&value, r),
                            None => value,
                        };
                        (key, value)
                    })
                    .collect(),
            )
        }
        (Value::Sequence(src), Value::Sequence(reference)) => Value::Sequence(
            src.iter()
                .enumerate()
                .map(|(i, item)| match reference.get(i) {
                    Some(r) => reorder_value_like(item, r),
                    None => item.clone(),
                })
                .collect(),
        ),
        _ => source.clone(),
    }
}
