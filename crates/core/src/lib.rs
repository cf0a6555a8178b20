//! # fuzzmatch-core
//!
//! The fuzzy structural match engine.
//!
//! - **expected**: compiles expected values (markers, embedded documents) into patterns
//! - **engine**: the [`Matcher`], comparing actual values against compiled patterns
//! - **result**: [`MatchResult`] and path-qualified [`Failure`] records
//! - **canonical**: key-order canonicalization used when printing failures
//! - **config**: [`MatchConfig`]
//!
//! Comparisons never mutate their inputs and share no state, so a single
//! [`Matcher`] can serve any number of threads.

// Re-export foundation crates
pub use fuzzmatch_path as path;
pub use fuzzmatch_types as types;
pub use fuzzmatch_validators as validators;

pub mod canonical;
pub mod config;
pub mod engine;
pub mod error;
pub mod expected;
mod matching;
pub mod mode;
pub mod result;

pub use canonical::{reorder_like, reorder_value_like};
pub use config::MatchConfig;
pub use engine::Matcher;
pub use error::MatchError;
pub use expected::{Expected, ExpectedXml, XmlContent};
pub use mode::MatchType;
pub use result::{Failure, MatchResult};

use fuzzmatch_types::Value;

/// Compares with the built-in validators and the default configuration.
pub fn compare(
    actual: &Value,
    expected: &Value,
    match_type: MatchType,
) -> Result<MatchResult, MatchError> {
    Matcher::default().compare(actual, expected, match_type)
}
