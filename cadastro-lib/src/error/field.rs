//! Field description errors

/// Errors raised while building form fields from a description.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FieldError {
    /// The declared kind tag is not one of the known field kinds.
    #[error("Unknown field kind '{0}'")]
    UnknownKind(String),

    /// A pattern expression failed to compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl FieldError {
    /// Creates a new unknown kind error.
    pub fn unknown_kind(tag: impl Into<String>) -> Self {
        Self::UnknownKind(tag.into())
    }

    /// Creates a new invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, err: &regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: err.to_string(),
        }
    }
}
