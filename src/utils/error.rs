//! Error types for the media converter.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.
//! Every type derives `Serialize` so command handlers can hand them straight to the frontend.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Errors raised while adding files to the queue or editing a queued file.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum QueueError {
    /// The path is already tracked
    #[error("The file '{0}' is already in the list.")]
    DuplicateFile(String),
    /// Extension (or requested target) is not in the format registry
    #[error("The file '{0}' is not supported.")]
    UnsupportedFormat(String),
    /// Path does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a regular file
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),
}

/// Errors raised by a single conversion attempt.
///
/// These never leave the dispatcher: they are folded into a
/// [`ConversionOutcome`](crate::core::ConversionOutcome).
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum ConversionError {
    /// Source could not be read as an image
    #[error("Decode error: {0}")]
    Decode(String),
    /// Target format unsupported by the codec, or encoding failed
    #[error("Encode error: {0}")]
    Encode(String),
    /// The external tool could not be launched
    #[error("Could not run {tool}: {reason}")]
    ToolMissing { tool: String, reason: String },
    /// Any other failure reported by the media library
    #[error("Conversion failed: {0}")]
    Failed(String),
}

/// Main error type for the converter application.
///
/// All errors in the application are converted to this type before being
/// returned to the frontend.
#[derive(Error, Debug, Serialize)]
pub enum ConverterError {
    /// Adding or editing a queued file failed
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// A conversion could not be carried out
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The output directory disappeared after startup
    #[error("Converted folder not found: {0}")]
    MissingOutputDirectory(PathBuf),

    /// No row carries this id
    #[error("File #{0} is not in the list")]
    UnknownFile(u64),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Shared state was poisoned by a panicking thread
    #[error("State error: {0}")]
    State(String),
}

/// Convenience result type for converter operations.
pub type ConverterResult<T> = Result<T, ConverterError>;

// Helper methods for error creation
impl ConverterError {
    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }
}

impl ConversionError {
    pub fn decode(msg: impl ToString) -> Self {
        Self::Decode(msg.to_string())
    }

    pub fn encode(msg: impl ToString) -> Self {
        Self::Encode(msg.to_string())
    }

    pub fn failed(msg: impl ToString) -> Self {
        Self::Failed(msg.to_string())
    }
}

// Convert std::io::Error to ConverterError
impl From<io::Error> for ConverterError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert a poisoned lock into a state error instead of propagating the panic
impl<T> From<std::sync::PoisonError<T>> for ConverterError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::State("File list state is corrupted".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_error_messages_name_the_file() {
        let err = QueueError::DuplicateFile("photo.png".to_string());
        assert_eq!(err.to_string(), "The file 'photo.png' is already in the list.");

        let err = QueueError::UnsupportedFormat("notes.txt".to_string());
        assert_eq!(err.to_string(), "The file 'notes.txt' is not supported.");
    }

    #[test]
    fn test_queue_error_is_transparent_in_converter_error() {
        let err: ConverterError = QueueError::DuplicateFile("a.jpg".to_string()).into();
        assert_eq!(err.to_string(), "The file 'a.jpg' is already in the list.");
    }

    #[test]
    fn test_converter_error_serializes_for_frontend() {
        let err = ConverterError::MissingOutputDirectory(PathBuf::from("/tmp/converted"));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["MissingOutputDirectory"], "/tmp/converted");
    }
}
