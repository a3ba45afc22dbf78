//! Error types module
//!
//! All failures of a single upload attempt are unified under `UploadError`.
//! None of them are fatal: the controller turns every variant into a
//! user-facing notification and stays interactive.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like a rejected key
    Debug,
    /// Warning level - for remote failures outside our control
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Failed to send request: {0}")]
    Transport(String),

    #[error("Upload failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl UploadError {
    /// Whether the service answered at all. Transport failures never reached it.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            UploadError::Status { .. } | UploadError::MalformedResponse(_)
        )
    }

    /// HTTP status returned by the service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            UploadError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            UploadError::Status { status, .. } if (400..500).contains(status) => LogLevel::Debug,
            UploadError::Status { .. } | UploadError::Transport(_) => LogLevel::Warn,
            UploadError::MalformedResponse(_) | UploadError::Io(_) | UploadError::Config(_) => {
                LogLevel::Error
            }
        }
    }
}

impl From<serde_json::Error> for UploadError {
    fn from(err: serde_json::Error) -> Self {
        UploadError::MalformedResponse(err.to_string())
    }
}
