//! Error types for match operations.
//!
//! A failed comparison is not an error: mismatches are reported through
//! [`MatchResult`](crate::MatchResult). These errors mean the comparison could
//! not be attempted at all.

use fuzzmatch_path::PathError;
use fuzzmatch_types::ValueError;
use fuzzmatch_validators::ValidatorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid document: {0}")]
    Value(#[from] ValueError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Validator(#[from] ValidatorError),

    #[error("Expected value is nested deeper than the limit of {limit} levels")]
    DepthLimitExceeded { limit: usize },
}
