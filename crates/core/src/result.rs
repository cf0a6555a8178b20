use crate::canonical::reorder_value_like;
use crate::mode::MatchType;
use fuzzmatch_path::PathExpression;
use fuzzmatch_types::Value;
use std::fmt;

/// One mismatch, located by its path in the actual document.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub path: PathExpression,
    pub message: String,
    /// `None` when the location does not exist in actual.
    pub actual: Option<Value>,
    pub expected: Value,
}

impl Failure {
    pub fn new(
        path: &PathExpression,
        message: impl Into<String>,
        actual: Option<&Value>,
        expected: Value,
    ) -> Self {
        Self {
            path: path.clone(),
            message: message.into(),
            actual: actual.cloned(),
            expected,
        }
    }

    /// `"<path>: <message>"`.
    pub fn reason(&self) -> String {
        format!("{}: {}", self.path, self.message)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

/// The outcome of one comparison. Passing means no failures were recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    match_type: MatchType,
    failures: Vec<Failure>,
}

impl MatchResult {
    pub fn new(match_type: MatchType, failures: Vec<Failure>) -> Self {
        Self {
            match_type,
            failures,
        }
    }

    pub fn passed(match_type: MatchType) -> Self {
        Self::new(match_type, Vec::new())
    }

    pub fn pass(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    /// Path-qualified reasons, in the order they were found.
    pub fn reasons(&self) -> Vec<String> {
        self.failures.iter().map(Failure::reason).collect()
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pass() {
            return write!(f, "match passed: {}", self.match_type);
        }
        writeln!(f, "match failed: {}", self.match_type)?;
        for failure in &self.failures {
            writeln!(f, "{}", failure)?;
            match &failure.actual {
                Some(actual) => {
                    let actual = reorder_value_like(actual, &failure.expected);
                    writeln!(f, "  actual: {}", actual)?;
                }
                None => writeln!(f, "  actual: (not present)")?,
            }
            writeln!(f, "  expected: {}", failure.expected)?;
        }
        Ok(())
    }
}
