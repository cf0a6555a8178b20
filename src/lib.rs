//! # fuzzmatch
//!
//! Structural document model, path addressing and a fuzzy match engine for
//! test-automation assertions.
//!
//! ```text
//! Value (types) ──► Path Engine (path) ──► Validators (validators) ──► Matcher (core)
//! ```
//!
//! ## Quick start
//!
//! ```
//! use fuzzmatch::{MatchType, Value, compare};
//! use serde_json::json;
//!
//! let actual = Value::from(json!({"id": "a9f7a56b-8d5c-455c-9d13-808461d17b91", "n": 2}));
//! let expected = Value::from(json!({"id": "#uuid"}));
//! assert!(compare(&actual, &expected, MatchType::Contains).unwrap().pass());
//! ```
//!
//! For repeated assertions against one expectation, compile it once with
//! [`Matcher::compile`] and reuse it through [`Matcher::compare_compiled`].

// Re-export member crates
pub use fuzzmatch_path as path;
pub use fuzzmatch_types as types;
pub use fuzzmatch_validators as validators;

// --- Public API ---
pub use fuzzmatch_core::{
    Expected, Failure, MatchConfig, MatchError, MatchResult, MatchType, Matcher, compare,
    reorder_like, reorder_value_like,
};
pub use fuzzmatch_path::{PathError, PathExpression, PathSegment, exists, get, parse_path, remove, set};
pub use fuzzmatch_types::{Kind, Mapping, Number, Value, ValueError, XmlElement, classify};
pub use fuzzmatch_validators::{Marker, Validator, ValidatorError, ValidatorRegistry};
