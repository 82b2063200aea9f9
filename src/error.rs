//! Error types for the processing client.

use thiserror::Error;

use crate::constants::{FILE_READ_MESSAGE, GENERIC_ERROR_MESSAGE, NO_FILE_MESSAGE};

/// Errors that can occur while reading a picked file or running an operation.
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// An operation was triggered with no file selected
    #[error("No image file selected")]
    NoFileSelected,

    /// A crop field did not contain a whole number
    #[error("Invalid value '{value}' for crop field '{field}'")]
    InvalidCropField {
        /// Name of the offending field
        field: &'static str,
        /// Raw text that failed to parse
        value: String,
    },

    /// The picked file could not be read
    #[error("Failed to read file: {0}")]
    FileRead(String),

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("Server returned HTTP {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Response body was not the expected JSON
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A string that should be a data URL was not one
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Base64 payload could not be decoded
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// I/O error while reading inputs or writing results
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessingError {
    /// Create a network error from any displayable cause.
    pub fn network(cause: impl std::fmt::Display) -> Self {
        Self::Network(cause.to_string())
    }

    /// Create a file read error from any displayable cause.
    pub fn file_read(cause: impl std::fmt::Display) -> Self {
        Self::FileRead(cause.to_string())
    }

    /// The message shown to the user.
    ///
    /// Every request failure collapses into the same generic text; only the
    /// precondition checks and unreadable files get their own wording.
    pub fn user_message(&self) -> String {
        match self {
            ProcessingError::NoFileSelected => NO_FILE_MESSAGE.to_string(),
            ProcessingError::FileRead(_) => FILE_READ_MESSAGE.to_string(),
            ProcessingError::InvalidCropField { field, .. } => {
                format!("Crop {} must be a whole number.", field)
            }
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
