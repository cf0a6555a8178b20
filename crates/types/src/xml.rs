//! Owned XML element tree, built from `roxmltree` and detached from the source text.
use crate::error::ValueError;
use indexmap::IndexMap;
use std::fmt;

/// A child of an element: either a nested element or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlChild {
    Element(XmlElement),
    Text(String),
}

/// An XML element with ordered attributes and children.
///
/// Whitespace-only text between elements is not kept, and text runs are trimmed,
/// so that pretty-printed and compact documents produce the same tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<XmlChild>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlChild::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlChild::Text(text.into()));
        self
    }

    /// Parses a document and returns its root element.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let doc = roxmltree::Document::parse(text).map_err(|e| ValueError::Xml(e.to_string()))?;
        Ok(Self::from_node(doc.root_element()))
    }

    /// Copies an element node of a parsed `roxmltree` document.
    pub fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut element = XmlElement::new(node.tag_name().name());
        for attr in node.attributes() {
            element
                .attributes
                .insert(attr.name().to_string(), attr.value().to_string());
        }
        for child in node.children() {
            if child.is_element() {
                element.children.push(XmlChild::Element(Self::from_node(child)));
            } else if child.is_text() {
                let text = child.text().unwrap_or("").trim();
                if !text.is_empty() {
                    element.children.push(XmlChild::Text(text.to_string()));
                }
            }
        }
        element
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlChild::Element(e) => Some(e),
            XmlChild::Text(_) => None,
        })
    }

    /// Concatenated text of the direct text children, `None` when there is none.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .children
            .iter()
            .filter_map(|c| match c {
                XmlChild::Text(t) => Some(t.as_str()),
                XmlChild::Element(_) => None,
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.concat())
        }
    }

    /// True when the element has no child elements (text only, or empty).
    pub fn is_leaf(&self) -> bool {
        self.child_elements().next().is_none()
    }

    /// Serializes the element as compact markup.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }

    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlChild::Element(e) => e.write_xml(out),
                XmlChild::Text(t) => out.push_str(&escape(t)),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_formatting_whitespace() {
        let xml = "<root>\n  <a id=\"1\">x</a>\n  <b/>\n</root>";
        let root = XmlElement::parse(xml).unwrap();
        assert_eq!(root.name, "root");
        assert_eq!(root.children.len(), 2);
        let a = root.child_elements().next().unwrap();
        assert_eq!(a.attributes.get("id").map(String::as_str), Some("1"));
        assert_eq!(a.text().as_deref(), Some("x"));
    }

    #[test]
    fn test_serialize_escapes_text() {
        let e = XmlElement::new("p")
            .with_attribute("title", "a\"b")
            .with_text("1 < 2");
        assert_eq!(e.to_xml_string(), "<p title=\"a&quot;b\">1 &lt; 2</p>");
    }

    #[test]
    fn test_invalid_markup_is_an_error() {
        assert!(matches!(XmlElement::parse("<a><b></a>"), Err(ValueError::Xml(_))));
    }

    #[test]
    fn test_empty_element_has_no_text() {
        let e = XmlElement::parse("<root></root>").unwrap();
        assert!(e.text().is_none());
        assert!(e.is_leaf());
    }
}
