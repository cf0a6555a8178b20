//! The recursive match engine.
//!
//! The engine walks the compiled expected tree and looks up the matching parts
//! of the actual value as it goes, so recursion depth is bounded by the depth
//! of the expected document (see [`MatchConfig::max_depth`]). Every mismatch
//! below a container is collected; nothing stops at the first failure.
use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::expected::{Expected, ExpectedXml, XmlContent};
use crate::matching::maximum_matching;
use crate::mode::MatchType;
use crate::result::{Failure, MatchResult};
use fuzzmatch_path::{PathExpression, PathSegment, parse_path};
use fuzzmatch_types::{Mapping, Value, XmlElement, looks_like_document};
use fuzzmatch_validators::ValidatorRegistry;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Compares actual values against expected patterns.
///
/// A matcher owns nothing mutable: it can be shared across threads and used for
/// any number of comparisons.
#[derive(Debug, Clone)]
pub struct Matcher {
    registry: Arc<ValidatorRegistry>,
    config: MatchConfig,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(Arc::new(ValidatorRegistry::default()), MatchConfig::default())
    }
}

impl Matcher {
    pub fn new(registry: Arc<ValidatorRegistry>, config: MatchConfig) -> Self {
        Self { registry, config }
    }

    pub fn with_config(config: MatchConfig) -> Self {
        Self::new(Arc::new(ValidatorRegistry::default()), config)
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn compile(&self, expected: &Value) -> Result<Expected, MatchError> {
        Expected::compile(expected, &self.registry, &self.config)
    }

    /// Compiles `expected` and compares `actual` against it.
    ///
    /// A mismatch is an `Ok` result that does not pass. `Err` means the
    /// expected value itself is unusable, e.g. a `#regex` that does not compile.
    pub fn compare(
        &self,
        actual: &Value,
        expected: &Value,
        match_type: MatchType,
    ) -> Result<MatchResult, MatchError> {
        let compiled = self.compile(expected)?;
        Ok(self.compare_compiled(actual, &compiled, match_type))
    }

    pub fn compare_compiled(
        &self,
        actual: &Value,
        expected: &Expected,
        match_type: MatchType,
    ) -> MatchResult {
        log::trace!("compare {} against {}", match_type, actual.kind());
        let failures = self.evaluate(Some(actual), expected, match_type, &PathExpression::root());
        log::trace!("compare {} done with {} failure(s)", match_type, failures.len());
        MatchResult::new(match_type, failures)
    }

    /// Compares every element of the actual sequence against `expected`.
    pub fn compare_each(
        &self,
        actual: &Value,
        expected: &Value,
        match_type: MatchType,
    ) -> Result<MatchResult, MatchError> {
        let compiled = self.compile(expected)?;
        Ok(self.compare_each_compiled(actual, &compiled, match_type))
    }

    pub fn compare_each_compiled(
        &self,
        actual: &Value,
        expected: &Expected,
        match_type: MatchType,
    ) -> MatchResult {
        if let Some(parsed) = self.parse_embedded(actual) {
            return self.compare_each_compiled(&parsed, expected, match_type);
        }
        let root = PathExpression::root();
        let failures = match actual {
            Value::Sequence(items) if items.is_empty() && !self.config.match_each_empty_allowed => {
                vec![Failure::new(
                    &root,
                    "match each failed, empty array / list",
                    Some(actual),
                    expected.to_value(),
                )]
            }
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .flat_map(|(i, item)| {
                    self.evaluate(Some(item), expected, match_type, &root.child_index(i))
                })
                .collect(),
            other => vec![Failure::new(
                &root,
                "actual is not an array or list",
                Some(other),
                expected.to_value(),
            )],
        };
        MatchResult::new(match_type, failures)
    }

    /// Compares the part of `actual` found at `path`. A missing location only
    /// passes for expectations that allow absence (`#notpresent`, `#ignore`,
    /// `##...`).
    pub fn compare_at(
        &self,
        actual: &Value,
        path: &str,
        expected: &Value,
        match_type: MatchType,
    ) -> Result<MatchResult, MatchError> {
        let path = parse_path(path)?;
        let compiled = self.compile(expected)?;
        let found = fuzzmatch_path::get(actual, &path);
        let failures = self.evaluate(found.as_deref(), &compiled, match_type, &path);
        Ok(MatchResult::new(match_type, failures))
    }

    /// Parses two JSON or XML texts and compares them.
    pub fn compare_documents(
        &self,
        actual: &str,
        expected: &str,
        match_type: MatchType,
    ) -> Result<MatchResult, MatchError> {
        let actual = Value::parse_document(actual)?;
        let expected = Value::parse_document(expected)?;
        self.compare(&actual, &expected, match_type)
    }

    // --- Evaluation ---

    /// Runs one comparison at `path`, applying negation for the `Not*` types.
    fn evaluate(
        &self,
        actual: Option<&Value>,
        expected: &Expected,
        match_type: MatchType,
        path: &PathExpression,
    ) -> Vec<Failure> {
        let mut failures = Vec::new();
        match actual {
            Some(actual) => {
                self.match_value(actual, expected, match_type.positive(), path, &mut failures)
            }
            None => self.match_absent(expected, path, &mut failures),
        }
        if !match_type.is_negated() {
            return failures;
        }
        if failures.is_empty() {
            let message = match match_type {
                MatchType::NotEquals => "is equal",
                _ => "actual contains expected",
            };
            vec![Failure::new(path, message, actual, expected.to_value())]
        } else {
            Vec::new()
        }
    }

    fn match_absent(&self, expected: &Expected, path: &PathExpression, out: &mut Vec<Failure>) {
        if expected.allows_absent() {
            return;
        }
        let (at, message) = match path.leaf() {
            Some(PathSegment::Key(key)) => (
                path.parent().unwrap_or_default(),
                format!("actual does not contain key - '{}'", key),
            ),
            _ => (path.clone(), "actual path does not exist".to_string()),
        };
        out.push(Failure::new(&at, message, None, expected.to_value()));
    }

    fn match_value(
        &self,
        actual: &Value,
        expected: &Expected,
        match_type: MatchType,
        path: &PathExpression,
        out: &mut Vec<Failure>,
    ) {
        if let Expected::Marker(marker) = expected {
            if let Err(failures) = marker.check(actual) {
                for failure in failures {
                    let relative = PathExpression::new(
                        failure.indexes.iter().map(|i| PathSegment::Index(Some(*i))).collect(),
                    );
                    let mut at = path.clone();
                    for &i in &failure.indexes {
                        at = at.child_index(i);
                    }
                    let element = fuzzmatch_path::get(actual, &relative);
                    out.push(Failure::new(&at, failure.message, element.as_deref(), expected.to_value()));
                }
            }
            return;
        }

        if expected.is_container() {
            if let Some(parsed) = self.parse_embedded(actual) {
                return self.match_value(&parsed, expected, match_type, path, out);
            }
        }

        match (actual, expected) {
            (Value::Sequence(items), Expected::Sequence(exp)) => {
                let visit = |a: &Value, e: &Expected, mt: MatchType, p: &PathExpression, out: &mut Vec<Failure>| {
                    self.match_value(a, e, child_type(mt, a, e), p, out)
                };
                let describe = |e: &Expected| e.to_value().to_string();
                self.match_items(
                    items,
                    exp,
                    match_type,
                    path,
                    &|i| path.child_index(i),
                    &visit,
                    &describe,
                    Whole::Value(actual, expected),
                    out,
                );
            }
            (Value::Mapping(map), Expected::Mapping(exp)) => {
                self.match_mapping(map, exp, match_type, path, Whole::Value(actual, expected), out)
            }
            (Value::Xml(element), Expected::Xml(exp)) => {
                self.match_xml(element, exp, match_type, path, out)
            }
            (_, Expected::Literal(literal)) if actual.kind() == literal.kind() => {
                match_scalar(actual, literal, match_type, path, out)
            }
            _ => {
                let expected_kind = expected
                    .kind()
                    .map(|k| k.to_string())
                    .unwrap_or_default();
                out.push(Failure::new(
                    path,
                    format!(
                        "data types don't match - actual {}, expected {}",
                        actual.kind(),
                        expected_kind
                    ),
                    Some(actual),
                    expected.to_value(),
                ));
            }
        }
    }

    /// Shared sequence logic for value sequences and XML child elements.
    #[allow(clippy::too_many_arguments)]
    fn match_items<A, E>(
        &self,
        actual: &[A],
        expected: &[E],
        match_type: MatchType,
        path: &PathExpression,
        item_path: &dyn Fn(usize) -> PathExpression,
        visit: &dyn Fn(&A, &E, MatchType, &PathExpression, &mut Vec<Failure>),
        describe: &dyn Fn(&E) -> String,
        whole: Whole<'_>,
        out: &mut Vec<Failure>,
    ) {
        let (actual_len, expected_len) = (actual.len(), expected.len());
        let probe = |a: usize, e: &E| {
            let mut scratch = Vec::new();
            visit(&actual[a], e, match_type, &item_path(a), &mut scratch);
            scratch.is_empty()
        };

        match match_type {
            MatchType::Equals => {
                if actual_len != expected_len {
                    out.push(whole.failure(
                        path,
                        format!(
                            "actual size is not equal to expected size - {}:{}",
                            actual_len, expected_len
                        ),
                    ));
                    return;
                }
                for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
                    visit(a, e, match_type, &item_path(i), out);
                }
            }
            MatchType::ContainsAny => {
                let found = expected
                    .iter()
                    .any(|e| (0..actual_len).any(|a| probe(a, e)));
                if !found {
                    out.push(whole.failure(path, "actual list does not contain any expected item"));
                }
            }
            _ => {
                if expected_len > actual_len {
                    out.push(whole.failure(
                        path,
                        format!(
                            "actual size is less than expected size - {}:{}",
                            actual_len, expected_len
                        ),
                    ));
                    return;
                }
                if match_type == MatchType::ContainsOnly && expected_len != actual_len {
                    out.push(whole.failure(
                        path,
                        format!(
                            "actual size is not equal to expected size - {}:{}",
                            actual_len, expected_len
                        ),
                    ));
                    return;
                }
                let candidates: Vec<Vec<usize>> = expected
                    .iter()
                    .map(|e| (0..actual_len).filter(|&a| probe(a, e)).collect())
                    .collect();
                let assigned = maximum_matching(&candidates, actual_len);
                for (e, slot) in expected.iter().zip(&assigned) {
                    if slot.is_none() {
                        out.push(whole.failure(
                            path,
                            format!("actual list does not contain expected item - {}", describe(e)),
                        ));
                    }
                }
            }
        }
    }

    fn match_mapping(
        &self,
        actual: &Mapping,
        expected: &IndexMap<String, Expected>,
        match_type: MatchType,
        path: &PathExpression,
        whole: Whole<'_>,
        out: &mut Vec<Failure>,
    ) {
        if matches!(match_type, MatchType::Equals | MatchType::ContainsOnly) {
            let extra: Mapping = actual
                .iter()
                .filter(|(key, _)| !expected.contains_key(*key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            if !extra.is_empty() {
                out.push(whole.failure(
                    path,
                    format!(
                        "actual has {} more key(s) than expected - {}",
                        extra.len(),
                        Value::Mapping(extra)
                    ),
                ));
            }
        }

        if match_type == MatchType::ContainsAny {
            let any = expected.iter().any(|(key, exp)| match actual.get(key) {
                None => exp.allows_absent(),
                Some(value) => {
                    let mut scratch = Vec::new();
                    let child_path = path.child_key(key);
                    self.match_value(value, exp, child_type(match_type, value, exp), &child_path, &mut scratch);
                    scratch.is_empty()
                }
            });
            if !any {
                out.push(whole.failure(path, "no key-values matched"));
            }
            return;
        }

        for (key, exp) in expected {
            let child_path = path.child_key(key);
            match actual.get(key) {
                None => self.match_absent(exp, &child_path, out),
                Some(value) => {
                    self.match_value(value, exp, child_type(match_type, value, exp), &child_path, out)
                }
            }
        }
    }

    fn match_xml(
        &self,
        actual: &XmlElement,
        expected: &ExpectedXml,
        match_type: MatchType,
        path: &PathExpression,
        out: &mut Vec<Failure>,
    ) {
        let whole = Whole::Xml(actual, expected);
        if actual.name != expected.name {
            out.push(whole.failure(
                path,
                format!("expected element <{}>, actual <{}>", expected.name, actual.name),
            ));
            return;
        }

        if matches!(match_type, MatchType::Equals | MatchType::ContainsOnly) {
            let extra: Vec<String> = actual
                .attributes
                .keys()
                .filter(|name| !expected.attributes.contains_key(*name))
                .map(|name| format!("@{}", name))
                .collect();
            if !extra.is_empty() {
                out.push(whole.failure(
                    path,
                    format!(
                        "actual has {} more attribute(s) than expected - {}",
                        extra.len(),
                        extra.join(", ")
                    ),
                ));
            }
        }
        for (name, exp) in &expected.attributes {
            let child_path = path.child_key(format!("@{}", name));
            match actual.attributes.get(name) {
                None => self.match_absent(exp, &child_path, out),
                Some(value) => {
                    self.match_value(&Value::from(value.as_str()), exp, MatchType::Equals, &child_path, out)
                }
            }
        }

        match &expected.content {
            XmlContent::Text(text) => {
                let content = if actual.is_leaf() {
                    Value::from(actual.text())
                } else {
                    Value::Xml(actual.clone())
                };
                self.match_value(&content, text, MatchType::Equals, path, out);
            }
            XmlContent::Elements(children) => {
                let actual_children: Vec<&XmlElement> = actual.child_elements().collect();
                let paths = sibling_paths(path, &actual_children);
                // Child elements keep the mode, so containment reaches every level.
                let visit = |a: &&XmlElement, e: &ExpectedXml, mt: MatchType, p: &PathExpression, out: &mut Vec<Failure>| {
                    let mt = match mt {
                        MatchType::ContainsAny => MatchType::Contains,
                        other => other,
                    };
                    self.match_xml(a, e, mt, p, out)
                };
                let describe = |e: &ExpectedXml| e.to_element().to_string();
                self.match_items(
                    &actual_children,
                    children,
                    match_type,
                    path,
                    &|i| paths.get(i).cloned().unwrap_or_else(|| path.clone()),
                    &visit,
                    &describe,
                    whole,
                    out,
                );
            }
        }
    }

    /// An actual string standing in for a document, parsed.
    fn parse_embedded(&self, actual: &Value) -> Option<Value> {
        let Value::String(text) = actual else {
            return None;
        };
        if !self.config.parse_embedded_documents || !looks_like_document(text) {
            return None;
        }
        match Value::parse_document(text) {
            Ok(document) => Some(document),
            Err(e) => {
                log::debug!("Actual text looks like a document but is compared as text: {}", e);
                None
            }
        }
    }
}

/// Children of a sequence or mapping are matched with `Equals`, except under
/// `ContainsDeep`, which carries on into nested containers.
fn child_type(match_type: MatchType, actual: &Value, expected: &Expected) -> MatchType {
    if match_type == MatchType::ContainsDeep && (actual.is_container() || expected.is_container()) {
        MatchType::ContainsDeep
    } else {
        MatchType::Equals
    }
}

fn match_scalar(
    actual: &Value,
    expected: &Value,
    match_type: MatchType,
    path: &PathExpression,
    out: &mut Vec<Failure>,
) {
    let (ok, message) = match (actual, expected) {
        (Value::Number(a), Value::Number(e)) => (a.numeric_eq(e), None),
        (Value::String(a), Value::String(e)) if match_type.is_containment() => (
            a.contains(e.as_str()),
            Some("actual does not contain expected".to_string()),
        ),
        _ => (actual == expected, None),
    };
    if !ok {
        let message = message.unwrap_or_else(|| {
            format!("expected {}, actual {}", expected.describe(), actual.describe())
        });
        out.push(Failure::new(path, message, Some(actual), expected.clone()));
    }
}

/// `$.item`, `$.item[1]`, `$.note`: each child addressed the way the XML path
/// adapter resolves it.
fn sibling_paths(parent: &PathExpression, children: &[&XmlElement]) -> Vec<PathExpression> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    children
        .iter()
        .map(|child| {
            let n = seen.entry(child.name.as_str()).or_insert(0);
            let path = parent.child_key(&child.name);
            let path = if *n == 0 { path } else { path.child_index(*n) };
            *n += 1;
            path
        })
        .collect()
}

/// The container a container-level failure is reported against.
#[derive(Clone, Copy)]
enum Whole<'a> {
    Value(&'a Value, &'a Expected),
    Xml(&'a XmlElement, &'a ExpectedXml),
}

impl Whole<'_> {
    fn failure(&self, path: &PathExpression, message: impl Into<String>) -> Failure {
        match *self {
            Whole::Value(actual, expected) => {
                Failure::new(path, message, Some(actual), expected.to_value())
            }
            Whole::Xml(actual, expected) => Failure::new(
                path,
                message,
                Some(&Value::Xml(actual.clone())),
                Value::Xml(expected.to_element()),
            ),
        }
    }
}
