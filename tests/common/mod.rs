pub mod fixtures;

use fuzzmatch::{MatchResult, MatchType, Value, compare};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Route `log` output through the test harness; safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a [`Value`] from a `serde_json::json!` literal
pub fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// Compare two JSON literals with the default matcher
pub fn check(
    actual: serde_json::Value,
    expected: serde_json::Value,
    match_type: MatchType,
) -> Result<MatchResult, fuzzmatch::MatchError> {
    compare(&v(actual), &v(expected), match_type)
}

/// Assert that a result failed and that one of its reasons contains `needle`
pub fn assert_reason_contains(result: &MatchResult, needle: &str) {
    assert!(!result.pass(), "expected failure, got pass");
    assert!(
        result.reasons().iter().any(|r| r.contains(needle)),
        "no reason contains {:?}:\n{}",
        needle,
        result
    );
}
