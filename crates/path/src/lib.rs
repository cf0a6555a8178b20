//! Path expressions over structured values.
//!
//! A path such as `$.items[2].name` is parsed once into a [`PathExpression`] and
//! can then be used to read, write, test and delete locations in a [`Value`]
//! tree. Writes create missing intermediate containers; XML trees are readable
//! through the same syntax but cannot be modified.
//!
//! [`Value`]: fuzzmatch_types::Value

pub mod ast;
pub mod error;
pub mod ops;
mod parser;
pub mod xml;

// --- Public API ---
pub use ast::{PathExpression, PathSegment};
pub use error::PathError;
pub use ops::{exists, get, get_mut, remove, set};
pub use parser::parse_path;

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzmatch_types::Value;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_parse_and_set_nested() {
        let mut root = Value::empty_mapping();
        let path = parse_path("a.b[2]").unwrap();
        set(&mut root, &path, Value::from("x")).unwrap();
        assert_eq!(root, Value::from_json(json!({"a": {"b": [null, null, "x"]}})));
        assert!(exists(&root, &path));
    }

    #[test]
    fn test_get_through_xml_value() {
        let xml = fuzzmatch_types::XmlElement::parse("<r><v>1</v></r>").unwrap();
        let mut root = Value::from_json(json!({"body": null}));
        set(&mut root, &parse_path("body").unwrap(), Value::Xml(xml)).unwrap();
        let text = get(&root, &parse_path("$.body.v.#text").unwrap()).unwrap();
        assert_eq!(text.into_owned(), Value::from("1"));
    }

    #[test]
    fn test_set_inside_xml_is_unsupported() {
        let xml = fuzzmatch_types::XmlElement::parse("<r><v>1</v></r>").unwrap();
        let mut root = Value::Xml(xml);
        let err = set(&mut root, &parse_path("v").unwrap(), Value::Null).unwrap_err();
        assert!(matches!(err, PathError::UnsupportedTarget { .. }));
        let err = remove(&mut root, &parse_path("v").unwrap()).unwrap_err();
        assert!(matches!(err, PathError::UnsupportedTarget { .. }));
    }

    fn segment_strategy() -> impl Strategy<Value = PathSegment> {
        prop_oneof![
            "[a-z][a-z0-9_]{0,6}".prop_map(PathSegment::Key),
            (0usize..4).prop_map(|i| PathSegment::Index(Some(i))),
        ]
    }

    fn path_strategy() -> impl Strategy<Value = PathExpression> {
        (
            "[a-z][a-z0-9_]{0,6}",
            proptest::collection::vec(segment_strategy(), 0..5),
        )
            .prop_map(|(first, rest)| {
                let mut segments = vec![PathSegment::Key(first)];
                segments.extend(rest);
                PathExpression::new(segments)
            })
    }

    proptest! {
        #[test]
        fn prop_set_then_get_round_trips(path in path_strategy(), n in any::<i64>()) {
            let mut root = Value::empty_mapping();
            set(&mut root, &path, Value::from(n)).unwrap();
            let found = get(&root, &path).map(|v| v.into_owned());
            prop_assert_eq!(found, Some(Value::from(n)));
        }

        #[test]
        fn prop_display_reparses(path in path_strategy()) {
            let reparsed = parse_path(&path.to_string()).unwrap();
            prop_assert_eq!(reparsed, path);
        }
    }
}
