//! Error types for editor operations.

use crate::shapes::ShapeId;
use thiserror::Error;

/// Errors raised by the editor and its helpers.
///
/// Most editor operations cannot fail; these cover precondition violations
/// and malformed external input (colors, configuration).
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Shape not found on canvas: {0}")]
    UnknownShape(ShapeId),
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        EditorError::Config(err.to_string())
    }
}

impl From<std::io::Error> for EditorError {
    fn from(err: std::io::Error) -> Self {
        EditorError::Config(err.to_string())
    }
}

/// Result type for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
