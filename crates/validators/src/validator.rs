//! Compiled, stateless predicates over a [`Value`].
use fuzzmatch_types::Value;
use regex::Regex;
use std::fmt;

/// A marker name plus its optional argument text, e.g. `regex` / `[a-z]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorSpec {
    pub name: String,
    pub argument: Option<String>,
}

impl ValidatorSpec {
    pub fn new(name: impl Into<String>, argument: Option<&str>) -> Self {
        Self {
            name: name.into(),
            argument: argument.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Validator {
    /// Passes for any value. A mapping key holding `#ignore` may be absent.
    Ignore,
    /// Passes for any value, but the key must exist.
    Present,
    /// Only an absent key passes; any present value fails.
    NotPresent,
    Null,
    NotNull,
    Uuid,
    String,
    Number,
    Boolean,
    Array,
    Object,
    /// Anchored full-string match against a pre-compiled pattern.
    Regex(Regex),
}

impl Validator {
    pub fn name(&self) -> &'static str {
        match self {
            Validator::Ignore => "ignore",
            Validator::Present => "present",
            Validator::NotPresent => "notpresent",
            Validator::Null => "null",
            Validator::NotNull => "notnull",
            Validator::Uuid => "uuid",
            Validator::String => "string",
            Validator::Number => "number",
            Validator::Boolean => "boolean",
            Validator::Array => "array",
            Validator::Object => "object",
            Validator::Regex(_) => "regex",
        }
    }

    /// Whether a mapping key holding this validator may be missing from actual.
    pub fn allows_absent(&self) -> bool {
        matches!(self, Validator::Ignore | Validator::NotPresent)
    }

    /// Applies the predicate to a present value. The error is the failure message.
    pub fn check(&self, actual: &Value) -> Result<(), &'static str> {
        let (ok, message) = match self {
            Validator::Ignore | Validator::Present => (true, ""),
            Validator::NotPresent => (false, "present"),
            Validator::Null => (actual.is_null(), "not null"),
            Validator::NotNull => (!actual.is_null(), "null"),
            Validator::Uuid => (actual.as_str().is_some_and(is_uuid), "not a valid #uuid"),
            Validator::String => (matches!(actual, Value::String(_)), "not a string"),
            // Bool is its own variant, so `true` never passes as a number.
            Validator::Number => (matches!(actual, Value::Number(_)), "not a number"),
            Validator::Boolean => (matches!(actual, Value::Bool(_)), "not a boolean"),
            Validator::Array => (matches!(actual, Value::Sequence(_)), "not an array or list"),
            Validator::Object => (matches!(actual, Value::Mapping(_)), "not an object or map"),
            Validator::Regex(re) => (
                actual.as_str().is_some_and(|s| re.is_match(s)),
                "regex match failed",
            ),
        };
        if ok { Ok(()) } else { Err(message) }
    }
}

/// Canonical 36 character hyphenated form only.
fn is_uuid(text: &str) -> bool {
    text.len() == 36 && uuid::Uuid::try_parse(text).is_ok()
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Regex(re) => {
                let anchored = re.as_str();
                let pattern = anchored
                    .strip_prefix("^(?:")
                    .and_then(|p| p.strip_suffix(")$"))
                    .unwrap_or(anchored);
                write!(f, "#regex {}", pattern)
            }
            other => write!(f, "#{}", other.name()),
        }
    }
}
