//! The tagged structured value and its classification.
use crate::error::ValueError;
use crate::number::Number;
use crate::xml::XmlElement;
use indexmap::IndexMap;
use std::fmt;

/// An ordered mapping with unique keys; insertion order is preserved.
pub type Mapping = IndexMap<String, Value>;

/// A value that none of the other variants describe.
///
/// Opaque values are compared by their textual representation only.
#[derive(Debug, Clone)]
pub struct Opaque {
    pub type_name: String,
    pub text: String,
}

impl Opaque {
    pub fn new(type_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            text: text.into(),
        }
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

/// One node of a JSON/XML-like document.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Bytes(Vec<u8>),
    Sequence(Vec<Value>),
    Mapping(Mapping),
    Xml(XmlElement),
    Opaque(Opaque),
}

/// The classification of a [`Value`]. Every value has exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Bytes,
    Sequence,
    Mapping,
    Xml,
    Opaque,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Null => "NULL",
            Kind::Bool => "BOOLEAN",
            Kind::Number => "NUMBER",
            Kind::String => "STRING",
            Kind::Bytes => "BYTES",
            Kind::Sequence => "SEQUENCE",
            Kind::Mapping => "MAPPING",
            Kind::Xml => "XML",
            Kind::Opaque => "OPAQUE",
        }
    }

    /// Containers are recursed into by the match engine; everything else is a leaf.
    pub fn is_container(&self) -> bool {
        matches!(self, Kind::Sequence | Kind::Mapping | Kind::Xml)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Bytes(_) => Kind::Bytes,
            Value::Sequence(_) => Kind::Sequence,
            Value::Mapping(_) => Kind::Mapping,
            Value::Xml(_) => Kind::Xml,
            Value::Opaque(_) => Kind::Opaque,
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn empty_mapping() -> Value {
        Value::Mapping(Mapping::new())
    }

    pub fn empty_sequence() -> Value {
        Value::Sequence(Vec::new())
    }

    /// Parses JSON text into a value, keeping key order.
    pub fn parse_json(text: &str) -> Result<Value, ValueError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Value::from_json(json))
    }

    /// Parses text that looks like an embedded document: JSON when it starts with
    /// `{` or `[`, XML when it starts with `<`.
    pub fn parse_document(text: &str) -> Result<Value, ValueError> {
        let trimmed = text.trim_start();
        match trimmed.chars().next() {
            Some('{') | Some('[') => Value::parse_json(trimmed),
            Some('<') => XmlElement::parse(trimmed).map(Value::Xml),
            _ => Err(ValueError::NotADocument(text.to_string())),
        }
    }

    /// A short rendering for diagnostics: strings are single-quoted, everything
    /// else uses the compact document form.
    pub fn describe(&self) -> String {
        match self {
            Value::String(s) => format!("'{}'", s),
            other => other.to_string(),
        }
    }
}

/// True when the text would be picked up as an embedded JSON or XML literal.
pub fn looks_like_document(text: &str) -> bool {
    matches!(
        text.trim_start().chars().next(),
        Some('{') | Some('[') | Some('<')
    )
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Xml(e) => write!(f, "{}", e),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::Opaque(o) => f.write_str(&o.text),
            other => {
                let json = other.to_json();
                let text = serde_json::to_string(&json).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value.into())
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl From<XmlElement> for Value {
    fn from(value: XmlElement) -> Self {
        Value::Xml(value)
    }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self {
        Value::Opaque(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_is_exclusive() {
        let values = vec![
            Value::Null,
            Value::from(true),
            Value::from(1),
            Value::from("a"),
            Value::from(vec![1u8, 2]),
            Value::from(vec![Value::Null]),
            Value::empty_mapping(),
            Value::from(XmlElement::new("a")),
            Value::from(Opaque::new("Instant", "2020-01-01")),
        ];
        let kinds: Vec<Kind> = values.iter().map(Value::kind).collect();
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_containers() {
        assert!(Value::empty_sequence().is_container());
        assert!(Value::empty_mapping().is_container());
        assert!(Value::from(XmlElement::new("a")).is_container());
        assert!(!Value::from("[]").is_container());
        assert!(!Value::Null.is_container());
    }

    #[test]
    fn test_parse_document_sniffs_leading_character() {
        let json = Value::parse_document("{\"a\":1}").unwrap();
        assert_eq!(json.kind(), Kind::Mapping);
        let list = Value::parse_document("  [1, 2]").unwrap();
        assert_eq!(list.kind(), Kind::Sequence);
        let xml = Value::parse_document("<a>1</a>").unwrap();
        assert_eq!(xml.kind(), Kind::Xml);
        assert!(Value::parse_document("hello").is_err());
    }

    #[test]
    fn test_display_and_describe() {
        let v = Value::from(json!({"a": [1, "x", null]}));
        assert_eq!(v.to_string(), r#"{"a":[1,"x",null]}"#);
        assert_eq!(Value::from("foo").describe(), "'foo'");
        assert_eq!(Value::from(vec![1u8, 2, 3]).to_string(), "<3 bytes>");
    }

    #[test]
    fn test_opaque_compares_by_text() {
        let a = Value::from(Opaque::new("A", "same"));
        let b = Value::from(Opaque::new("B", "same"));
        assert_eq!(a, b);
    }
}
