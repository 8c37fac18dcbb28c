//! Error types for registry lookups and inspection output
//!
//! Matching itself never fails: a rule either matches or leaves the input for
//! the next rule. Errors only arise around the edges of the library.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// No transformer with this name in the registry
    TransformerNotFound(String),
    /// Rendering a tree or rule listing failed
    SerializationError(String),
    /// Requested output or operation is not available
    NotSupported(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::TransformerNotFound(name) => {
                write!(f, "Transformer '{name}' not found")
            }
            TransformError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            TransformError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for TransformError {}

impl From<serde_json::Error> for TransformError {
    fn from(err: serde_json::Error) -> Self {
        TransformError::SerializationError(err.to_string())
    }
}
