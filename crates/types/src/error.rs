use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValueError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("Not a document literal: '{0}'")]
    NotADocument(String),
}
