//! Named validators ("markers") usable in place of literal expected values.
//!
//! A marker is a string such as `#string`, `##number`, `#regex [a-z]+` or
//! `#[2] #uuid`. Marker text is compiled once, against a [`ValidatorRegistry`],
//! into a [`Marker`] holding stateless predicates; matching then never looks at
//! the marker text again.

pub mod error;
pub mod marker;
pub mod registry;
pub mod validator;

// --- Public API ---
pub use error::ValidatorError;
pub use marker::{Marker, MarkerFailure, MarkerKind};
pub use registry::{ValidatorFactory, ValidatorRegistry};
pub use validator::{Validator, ValidatorSpec};

/// True when `text` would be read as marker syntax (it starts with `#`).
pub fn is_marker_text(text: &str) -> bool {
    text.starts_with('#')
}
