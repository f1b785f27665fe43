//! Error types

mod field;
mod lookup;

pub use field::*;
pub use lookup::*;

/// Top-level error for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field description could not be turned into a form field.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The postal-code lookup failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A form or config document could not be decoded.
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}
