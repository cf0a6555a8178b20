//! Compiles an expected value into a reusable match pattern.
//!
//! Compilation resolves everything about the expected side up front: marker
//! strings become compiled [`Marker`]s and strings holding JSON or XML become
//! structure. A compiled [`Expected`] can then be matched any number of times,
//! from any number of threads, without re-reading marker text.
use crate::config::MatchConfig;
use crate::error::MatchError;
use fuzzmatch_types::{Kind, Mapping, Value, XmlChild, XmlElement, looks_like_document};
use fuzzmatch_validators::{Marker, ValidatorRegistry, is_marker_text};
use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub enum Expected {
    Marker(Marker),
    /// A scalar compared by value.
    Literal(Value),
    Sequence(Vec<Expected>),
    Mapping(IndexMap<String, Expected>),
    Xml(ExpectedXml),
}

#[derive(Debug, Clone)]
pub struct ExpectedXml {
    pub name: String,
    pub attributes: IndexMap<String, Expected>,
    pub content: XmlContent,
}

#[derive(Debug, Clone)]
pub enum XmlContent {
    /// The element holds no child elements: its text (null when empty) is
    /// compared against the actual element's text.
    Text(Box<Expected>),
    /// Child elements, compared in document order.
    Elements(Vec<ExpectedXml>),
}

impl Expected {
    pub fn compile(
        value: &Value,
        registry: &ValidatorRegistry,
        config: &MatchConfig,
    ) -> Result<Expected, MatchError> {
        Compiler { registry, config }.compile(value, 0)
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Expected::Sequence(_) | Expected::Mapping(_) | Expected::Xml(_)
        )
    }

    /// The kind of value a literal or structural expectation describes.
    /// Markers describe no particular kind and report `None`.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Expected::Marker(_) => None,
            Expected::Literal(v) => Some(v.kind()),
            Expected::Sequence(_) => Some(Kind::Sequence),
            Expected::Mapping(_) => Some(Kind::Mapping),
            Expected::Xml(_) => Some(Kind::Xml),
        }
    }

    pub fn as_marker(&self) -> Option<&Marker> {
        match self {
            Expected::Marker(m) => Some(m),
            _ => None,
        }
    }

    /// Whether a mapping key with this expectation may be missing from actual.
    pub fn allows_absent(&self) -> bool {
        self.as_marker().is_some_and(Marker::allows_absent)
    }

    /// The expectation as a plain value, with markers shown as their text.
    pub fn to_value(&self) -> Value {
        match self {
            Expected::Marker(m) => Value::from(m.text()),
            Expected::Literal(v) => v.clone(),
            Expected::Sequence(items) => Value::Sequence(items.iter().map(Expected::to_value).collect()),
            Expected::Mapping(map) => Value::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect::<Mapping>(),
            ),
            Expected::Xml(xml) => Value::Xml(xml.to_element()),
        }
    }
}

impl ExpectedXml {
    pub fn to_element(&self) -> XmlElement {
        let mut element = XmlElement::new(&self.name);
        for (name, value) in &self.attributes {
            element.attributes.insert(name.clone(), leaf_text(value));
        }
        match &self.content {
            XmlContent::Text(text) => {
                if !matches!(text.as_ref(), Expected::Literal(Value::Null)) {
                    element.children.push(XmlChild::Text(leaf_text(text)));
                }
            }
            XmlContent::Elements(children) => {
                for child in children {
                    element.children.push(XmlChild::Element(child.to_element()));
                }
            }
        }
        element
    }
}

fn leaf_text(expected: &Expected) -> String {
    match expected.to_value() {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

struct Compiler<'a> {
    registry: &'a ValidatorRegistry,
    config: &'a MatchConfig,
}

impl Compiler<'_> {
    fn compile(&self, value: &Value, depth: usize) -> Result<Expected, MatchError> {
        if depth > self.config.max_depth {
            return Err(MatchError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        match value {
            Value::String(text) => self.compile_text(text, depth),
            Value::Sequence(items) => items
                .iter()
                .map(|item| self.compile(item, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Expected::Sequence),
            Value::Mapping(map) => map
                .iter()
                .map(|(k, v)| Ok((k.clone(), self.compile(v, depth + 1)?)))
                .collect::<Result<IndexMap<_, _>, MatchError>>()
                .map(Expected::Mapping),
            Value::Xml(element) => self.compile_xml(element, depth).map(Expected::Xml),
            other => Ok(Expected::Literal(other.clone())),
        }
    }

    /// A leading backslash is removed and the rest is compared as plain text.
    fn compile_text(&self, text: &str, depth: usize) -> Result<Expected, MatchError> {
        if let Some(escaped) = text.strip_prefix('\\') {
            return Ok(Expected::Literal(Value::from(escaped)));
        }
        if is_marker_text(text) {
            if let Some(marker) = Marker::parse(text, self.registry)? {
                return Ok(Expected::Marker(marker));
            }
        }
        if self.config.parse_embedded_documents && looks_like_document(text) {
            match Value::parse_document(text) {
                Ok(document) => return self.compile(&document, depth),
                Err(e) => log::debug!("Expected text looks like a document but is kept as text: {}", e),
            }
        }
        Ok(Expected::Literal(Value::from(text)))
    }

    fn compile_xml(&self, element: &XmlElement, depth: usize) -> Result<ExpectedXml, MatchError> {
        if depth > self.config.max_depth {
            return Err(MatchError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        let mut attributes = IndexMap::with_capacity(element.attributes.len());
        for (name, value) in &element.attributes {
            attributes.insert(name.clone(), self.compile_xml_text(value)?);
        }
        let content = if element.is_leaf() {
            let text = match element.text() {
                Some(text) => self.compile_xml_text(&text)?,
                None => Expected::Literal(Value::Null),
            };
            XmlContent::Text(Box::new(text))
        } else {
            let children = element
                .child_elements()
                .map(|child| self.compile_xml(child, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            XmlContent::Elements(children)
        };
        Ok(ExpectedXml {
            name: element.name.clone(),
            attributes,
            content,
        })
    }

    /// Attribute values and element text are markers or plain strings, never
    /// nested documents.
    fn compile_xml_text(&self, text: &str) -> Result<Expected, MatchError> {
        if let Some(escaped) = text.strip_prefix('\\') {
            return Ok(Expected::Literal(Value::from(escaped)));
        }
        if is_marker_text(text) {
            if let Some(marker) = Marker::parse(text, self.registry)? {
                return Ok(Expected::Marker(marker));
            }
        }
        Ok(Expected::Literal(Value::from(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compile(json: serde_json::Value) -> Result<Expected, MatchError> {
        Expected::compile(
            &Value::from_json(json),
            &ValidatorRegistry::default(),
            &MatchConfig::default(),
        )
    }

    #[test]
    fn test_markers_are_compiled() {
        let expected = compile(json!({"id": "#uuid", "name": "bob"})).unwrap();
        let Expected::Mapping(map) = expected else {
            panic!("expected a mapping");
        };
        assert!(matches!(map["id"], Expected::Marker(_)));
        assert!(matches!(map["name"], Expected::Literal(Value::String(_))));
    }

    #[test]
    fn test_embedded_documents_are_parsed() {
        let expected = compile(json!("{\"a\": [1, \"#number\"]}")).unwrap();
        let Expected::Mapping(map) = expected else {
            panic!("expected a mapping");
        };
        let Expected::Sequence(items) = &map["a"] else {
            panic!("expected a sequence");
        };
        assert!(matches!(items[1], Expected::Marker(_)));
    }

    #[test]
    fn test_escaped_text_stays_literal() {
        let marker = compile(json!("\\#string")).unwrap();
        assert!(matches!(marker, Expected::Literal(Value::String(ref s)) if s == "#string"));
        let document = compile(json!("\\{\"a\":1}")).unwrap();
        assert!(matches!(document, Expected::Literal(Value::String(ref s)) if s == "{\"a\":1}"));
        let plain = compile(json!("\\abc")).unwrap();
        assert!(matches!(plain, Expected::Literal(Value::String(ref s)) if s == "abc"));
        let doubled = compile(json!("\\\\#string")).unwrap();
        assert!(matches!(doubled, Expected::Literal(Value::String(ref s)) if s == "\\#string"));
    }

    #[test]
    fn test_broken_document_is_plain_text() {
        let expected = compile(json!("{not json")).unwrap();
        assert!(matches!(expected, Expected::Literal(Value::String(_))));
    }

    #[test]
    fn test_invalid_regex_fails_compilation() {
        let err = compile(json!({"code": "#regex [oops"})).unwrap_err();
        assert!(matches!(err, MatchError::Validator(_)));
    }

    #[test]
    fn test_depth_limit() {
        let config = MatchConfig {
            max_depth: 3,
            ..Default::default()
        };
        let registry = ValidatorRegistry::default();
        let shallow = Value::from_json(json!({"a": {"b": 1}}));
        assert!(Expected::compile(&shallow, &registry, &config).is_ok());
        let deep = Value::from_json(json!({"a": {"b": {"c": {"d": 1}}}}));
        let err = Expected::compile(&deep, &registry, &config).unwrap_err();
        assert!(matches!(err, MatchError::DepthLimitExceeded { limit: 3 }));
    }

    #[test]
    fn test_xml_compiles_text_and_attributes() {
        let xml = XmlElement::parse(r##"<user id="#number"><name>#string</name><tag/></user>"##).unwrap();
        let expected = Expected::compile(
            &Value::Xml(xml),
            &ValidatorRegistry::default(),
            &MatchConfig::default(),
        )
        .unwrap();
        let Expected::Xml(user) = &expected else {
            panic!("expected xml");
        };
        assert!(matches!(user.attributes["id"], Expected::Marker(_)));
        let XmlContent::Elements(children) = &user.content else {
            panic!("expected child elements");
        };
        assert!(matches!(&children[0].content, XmlContent::Text(t) if matches!(**t, Expected::Marker(_))));
        assert!(matches!(&children[1].content, XmlContent::Text(t) if matches!(**t, Expected::Literal(Value::Null))));
        assert_eq!(expected.to_value().to_string(), r##"<user id="#number"><name>#string</name><tag/></user>"##);
    }
}
