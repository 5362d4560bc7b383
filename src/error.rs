//! Error types for `Folio`
//!
//! This module defines all error types used throughout the page core,
//! providing clear error messages and proper error propagation.
//!
//! Field-level validation problems are not errors in this sense: they are
//! collected into [`ValidationErrors`](crate::forms::ValidationErrors) and
//! rendered inline. The variants below cover the remaining failure classes:
//! upload constraints, submission failures and storage/config trouble.

use crate::forms::photo_too_large;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `Folio`
#[derive(Debug, Error)]
pub enum FolioError {
    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Preference storage could not be read or written
    #[error("Preference storage error: {0}")]
    StorageError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stored theme value was neither `dark` nor `light`
    #[error("Invalid theme value: {0}")]
    InvalidTheme(String),

    /// Uploaded photo exceeds the size ceiling
    #[error("Photo is {size} bytes, limit is {limit} bytes")]
    PhotoTooLarge {
        /// Size of the rejected file in bytes
        size: u64,
        /// Configured ceiling in bytes
        limit: u64,
    },

    /// Photo could not be read or encoded
    #[error("Failed to decode photo: {0}")]
    PhotoDecodeFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A submission is already in flight
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// The submission backend reported a failure
    /// Preserves the underlying error source for full error chain transparency
    #[error("Submission failed: {0}")]
    SubmissionFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for `Folio` operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Convert an error to a user-friendly message
///
/// Returns text suitable for a toast notification or an inline hint.
pub fn get_user_friendly_error(error: &FolioError) -> String {
    match error {
        FolioError::ConfigError(_) => "Failed to load or save configuration.\n\n\
             Default settings will be used for this session."
            .to_string(),
        FolioError::StorageError(_) => "Your theme preference could not be saved.\n\n\
             It will be kept until the page is closed."
            .to_string(),
        FolioError::InvalidTheme(value) => {
            format!("Unknown theme \"{value}\". Falling back to the default theme.")
        }
        FolioError::PhotoTooLarge { limit, .. } => photo_too_large(*limit),
        FolioError::PhotoDecodeFailed(_) => "The selected photo could not be read.\n\n\
             Please choose another image."
            .to_string(),
        FolioError::SubmissionInProgress => {
            "Please wait for the current submission to finish.".to_string()
        }
        FolioError::SubmissionFailed(_) => "Failed to send. Try again.".to_string(),
        FolioError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        FolioError::JsonError(e) => {
            format!(
                "A settings file is corrupted:\n\n{e}\n\n\
                 Default settings will be used."
            )
        }
    }
}
