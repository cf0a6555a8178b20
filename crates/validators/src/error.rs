use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidatorError {
    #[error("Invalid argument for marker '{marker}': {message}")]
    InvalidArgument { marker: String, message: String },

    #[error("Marker '{0}' requires an expression evaluator, which is not available")]
    UnsupportedExpression(String),
}

impl ValidatorError {
    pub fn invalid(marker: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            marker: marker.into(),
            message: message.into(),
        }
    }
}
