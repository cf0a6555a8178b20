use fuzzmatch_types::Kind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Invalid path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    #[error("Cannot replace or remove the root path '$'")]
    RootPath,

    #[error("Cannot address into '{path}': found {found}")]
    NotAContainer { path: String, found: Kind },

    #[error("Cannot modify '{path}': {kind} trees are read-only")]
    UnsupportedTarget { path: String, kind: Kind },
}

impl PathError {
    pub fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }
}
