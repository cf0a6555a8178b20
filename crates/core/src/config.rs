use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    /// The maximum nesting depth of an expected document. Compiling anything
    /// deeper fails with `MatchError::DepthLimitExceeded`, which also bounds the
    /// recursion of every comparison made with the compiled pattern.
    ///
    /// Defaults to `256`.
    pub max_depth: usize,
    /// Whether an each-match over an empty sequence passes.
    ///
    /// Defaults to `false`.
    pub match_each_empty_allowed: bool,
    /// Whether strings that look like JSON or XML (`{`, `[` or `<` first) are
    /// parsed into documents before comparing.
    ///
    /// Defaults to `true`.
    pub parse_embedded_documents: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            match_each_empty_allowed: false,
            parse_embedded_documents: true,
        }
    }
}
