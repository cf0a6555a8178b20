//! Marker text grammar and compiled markers.
//!
//! ```text
//! #name            validator, e.g. #string
//! #name argument   validator with argument, e.g. #regex [a-z]+
//! ##name           optional: null or absent also passes
//! #[] / #[n]       sequence, optionally of exactly n elements
//! #[n] #marker     ... whose elements each satisfy #marker
//! ```
//!
//! `#(...)`, `#?` and `#name? ...` embed expressions, which cannot be evaluated
//! here and are rejected.
use crate::error::ValidatorError;
use crate::registry::ValidatorRegistry;
use crate::validator::{Validator, ValidatorSpec};
use fuzzmatch_types::Value;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_until, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, opt, rest},
    sequence::{delimited, preceded},
};
use std::fmt;

/// A compiled marker.
#[derive(Debug, Clone)]
pub struct Marker {
    text: String,
    optional: bool,
    kind: MarkerKind,
}

#[derive(Debug, Clone)]
pub enum MarkerKind {
    Validator(Validator),
    Sequence {
        size: Option<usize>,
        each: Option<Box<Marker>>,
    },
}

/// One failed check. `indexes` locates the failing element below the checked
/// value when an element marker failed.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerFailure {
    pub indexes: Vec<usize>,
    pub message: String,
}

impl MarkerFailure {
    fn new(message: impl Into<String>) -> Self {
        Self {
            indexes: Vec::new(),
            message: message.into(),
        }
    }
}

impl Marker {
    /// Compiles marker text. `Ok(None)` means the text is not a marker (no
    /// leading `#`, or an unregistered name) and should be compared literally.
    pub fn parse(text: &str, registry: &ValidatorRegistry) -> Result<Option<Marker>, ValidatorError> {
        let Ok((_, (optional, syntax))) = marker_syntax(text) else {
            return Ok(None);
        };
        let kind = match syntax {
            Syntax::Expression => {
                return Err(ValidatorError::UnsupportedExpression(text.to_string()));
            }
            Syntax::Named { name, tail } => {
                let argument = if tail.is_empty() {
                    None
                } else if tail.starts_with('?') {
                    return Err(ValidatorError::UnsupportedExpression(text.to_string()));
                } else if tail.starts_with(char::is_whitespace) {
                    Some(tail.trim()).filter(|a| !a.is_empty())
                } else {
                    // `#abc-def` and the like are plain text.
                    return Ok(None);
                };
                match registry.compile(&ValidatorSpec::new(name, argument))? {
                    Some(validator) => MarkerKind::Validator(validator),
                    None => return Ok(None),
                }
            }
            Syntax::Sequence { size, tail } => {
                let size = match size.trim() {
                    "" => None,
                    digits => match digits.parse::<usize>() {
                        Ok(n) => Some(n),
                        Err(_) => {
                            return Err(ValidatorError::UnsupportedExpression(text.to_string()));
                        }
                    },
                };
                let each = match tail.trim() {
                    "" => None,
                    element => match Marker::parse(element, registry)? {
                        Some(marker) => Some(Box::new(marker)),
                        None => {
                            return Err(ValidatorError::invalid(
                                text,
                                format!("'{}' is not a marker", element),
                            ));
                        }
                    },
                };
                MarkerKind::Sequence { size, each }
            }
        };
        Ok(Some(Marker {
            text: text.to_string(),
            optional,
            kind,
        }))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn kind(&self) -> &MarkerKind {
        &self.kind
    }

    /// Whether a mapping key holding this marker may be missing from actual.
    pub fn allows_absent(&self) -> bool {
        self.optional || matches!(&self.kind, MarkerKind::Validator(v) if v.allows_absent())
    }

    /// True for `#notpresent`, which fails on any present value, null included.
    pub fn requires_absent(&self) -> bool {
        matches!(self.kind, MarkerKind::Validator(Validator::NotPresent))
    }

    /// Checks a present value.
    pub fn check(&self, actual: &Value) -> Result<(), Vec<MarkerFailure>> {
        if self.optional && actual.is_null() {
            return Ok(());
        }
        match &self.kind {
            MarkerKind::Validator(validator) => validator
                .check(actual)
                .map_err(|message| vec![MarkerFailure::new(message)]),
            MarkerKind::Sequence { size, each } => {
                let Value::Sequence(items) = actual else {
                    return Err(vec![MarkerFailure::new("actual is not an array")]);
                };
                if let Some(expected) = size {
                    if items.len() != *expected {
                        return Err(vec![MarkerFailure::new(format!(
                            "actual array length is {}",
                            items.len()
                        ))]);
                    }
                }
                let Some(each) = each else {
                    return Ok(());
                };
                let mut failures = Vec::new();
                for (i, item) in items.iter().enumerate() {
                    if let Err(inner) = each.check(item) {
                        failures.extend(inner.into_iter().map(|mut f| {
                            f.indexes.insert(0, i);
                            f
                        }));
                    }
                }
                if failures.is_empty() { Ok(()) } else { Err(failures) }
            }
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// --- Grammar ---

enum Syntax<'a> {
    Named { name: &'a str, tail: &'a str },
    Sequence { size: &'a str, tail: &'a str },
    Expression,
}

fn marker_syntax(input: &str) -> IResult<&str, (bool, Syntax<'_>)> {
    let (input, _) = char('#').parse(input)?;
    let (input, optional) = map(opt(char('#')), |o| o.is_some()).parse(input)?;
    let (input, syntax) = alt((
        map((alt((char('('), char('?'))), rest), |_| Syntax::Expression),
        map(
            (delimited(char('['), take_until("]"), char(']')), rest),
            |(size, tail)| Syntax::Sequence { size, tail },
        ),
        map(
            (preceded(multispace0, take_while1(is_name_char)), rest),
            |(name, tail)| Syntax::Named { name, tail },
        ),
    ))
    .parse(input)?;
    Ok((input, (optional, syntax)))
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn marker(text: &str) -> Marker {
        Marker::parse(text, &ValidatorRegistry::default())
            .unwrap()
            .unwrap_or_else(|| panic!("'{}' should be a marker", text))
    }

    fn not_a_marker(text: &str) -> bool {
        matches!(Marker::parse(text, &ValidatorRegistry::default()), Ok(None))
    }

    fn v(json: serde_json::Value) -> Value {
        Value::from_json(json)
    }

    #[test]
    fn test_plain_text_is_not_a_marker() {
        assert!(not_a_marker("hello"));
        assert!(not_a_marker("#"));
        assert!(not_a_marker("#bob"));
        assert!(not_a_marker("#abc-def"));
    }

    #[test]
    fn test_named_markers() {
        assert!(marker("#string").check(&v(json!("x"))).is_ok());
        assert!(marker("# number").check(&v(json!(3))).is_ok());
        assert!(marker("#regex [0-9]{3}").check(&v(json!("123"))).is_ok());
    }

    #[test]
    fn test_optional_marker() {
        let m = marker("##string");
        assert!(m.is_optional());
        assert!(m.allows_absent());
        assert!(m.check(&Value::Null).is_ok());
        assert!(m.check(&v(json!("x"))).is_ok());
        let failures = m.check(&v(json!(1))).unwrap_err();
        assert_eq!(failures[0].message, "not a string");
    }

    #[test]
    fn test_absence_rules() {
        assert!(marker("#ignore").allows_absent());
        assert!(marker("#notpresent").allows_absent());
        assert!(marker("#notpresent").requires_absent());
        assert!(!marker("#present").allows_absent());
        assert!(!marker("#string").allows_absent());
    }

    #[test]
    fn test_sequence_markers() {
        assert!(marker("#[]").check(&v(json!([1, "a"]))).is_ok());
        assert!(marker("#[2]").check(&v(json!([1, 2]))).is_ok());

        let failures = marker("#[2]").check(&v(json!([1, 2, 3]))).unwrap_err();
        assert_eq!(failures[0].message, "actual array length is 3");

        let failures = marker("#[]").check(&v(json!({"a": 1}))).unwrap_err();
        assert_eq!(failures[0].message, "actual is not an array");
    }

    #[test]
    fn test_sequence_element_markers_report_indexes() {
        let m = marker("#[] #string");
        let failures = m.check(&v(json!(["a", 1, "b", true]))).unwrap_err();
        let indexes: Vec<Vec<usize>> = failures.iter().map(|f| f.indexes.clone()).collect();
        assert_eq!(indexes, vec![vec![1], vec![3]]);

        assert!(marker("#[3] ##number").check(&v(json!([1, null, 2]))).is_ok());
    }

    #[test]
    fn test_expressions_are_rejected() {
        let registry = ValidatorRegistry::default();
        for text in ["#(foo)", "#? _ > 0", "#string? _.length == 3", "#[foo.length]"] {
            assert!(
                matches!(
                    Marker::parse(text, &registry),
                    Err(ValidatorError::UnsupportedExpression(_))
                ),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_bad_element_marker() {
        let err = Marker::parse("#[] hello", &ValidatorRegistry::default()).unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidArgument { .. }));
    }
}
