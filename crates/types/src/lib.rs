//! Structured value model shared by the path engine, the validators and the
//! match engine.
//!
//! ## Key Types
//!
//! - **`Value`**: tagged union over every document shape the engine reasons about
//! - **`Kind`**: the classification of a value; exactly one per value
//! - **`Number`**: decimal-backed numeric leaf
//! - **`XmlElement`**: owned XML element tree produced by the `roxmltree` adapter

pub mod error;
mod json;
pub mod number;
pub mod value;
pub mod xml;

pub use error::ValueError;
pub use number::Number;
pub use value::{Kind, Mapping, Opaque, Value, looks_like_document};
pub use xml::{XmlChild, XmlElement};

/// Converts any supported host input into a [`Value`].
///
/// Classification is total and deterministic: the same logical input always
/// lands in the same variant, which [`Value::kind`] then reports.
pub fn classify(input: impl Into<Value>) -> Value {
    input.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_is_idempotent() {
        let inputs = vec![
            json!(null),
            json!(true),
            json!(12.5),
            json!("s"),
            json!([1, 2]),
            json!({"a": {"b": 1}}),
        ];
        for input in inputs {
            let first = classify(input.clone());
            let second = classify(first.clone());
            assert_eq!(first.kind(), classify(input).kind());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_number_does_not_classify_as_bool() {
        assert_eq!(classify(json!(1)).kind(), Kind::Number);
        assert_eq!(classify(json!(true)).kind(), Kind::Bool);
    }
}
