//! Error types for stunting-assist.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`AssistError`] enum. Errors raised while a request is being handled are
//! turned into a `{"success": false, "message": ...}` envelope by
//! [`crate::envelope`]; errors raised while loading artifacts abort the
//! process.
//!
//! # Examples
//!
//! ```
//! use stunting_assist::error::{AssistError, Result};
//!
//! fn check_sex(code: &str) -> Result<()> {
//!     if code != "M" && code != "F" {
//!         return Err(AssistError::invalid_input(format!("Unknown sex: {code}")));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_sex("X").unwrap_err();
//! assert_eq!(err.to_string(), "Unknown sex: X");
//! ```

use std::io;

use thiserror::Error;

/// The main error type for stunting-assist operations.
#[derive(Error, Debug)]
pub enum AssistError {
    /// I/O errors (reading artifacts, stdin, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// A model artifact is missing, unreadable or inconsistent.
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request was malformed or carried an unsupported value.
    ///
    /// The message is reported verbatim to the caller.
    #[error("{0}")]
    InvalidInput(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// The classifier failed while running a forward pass.
    #[error("Inference error: {0}")]
    Inference(String),
}

/// Result type alias for operations that may fail with AssistError.
pub type Result<T> = std::result::Result<T, AssistError>;

impl AssistError {
    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        AssistError::Artifact(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AssistError::Config(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        AssistError::InvalidInput(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        AssistError::Analysis(msg.into())
    }

    /// Create a new inference error.
    pub fn inference<S: Into<String>>(msg: S) -> Self {
        AssistError::Inference(msg.into())
    }

    /// Whether this error belongs to a single request rather than to startup.
    pub fn is_request_scoped(&self) -> bool {
        matches!(
            self,
            AssistError::Json(_)
                | AssistError::InvalidInput(_)
                | AssistError::Analysis(_)
                | AssistError::Inference(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = AssistError::artifact("words.json is missing");
        assert_eq!(error.to_string(), "Artifact error: words.json is missing");

        let error = AssistError::invalid_input("No message provided");
        assert_eq!(error.to_string(), "No message provided");

        let error = AssistError::inference("shape mismatch");
        assert_eq!(error.to_string(), "Inference error: shape mismatch");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = AssistError::from(io_error);

        match error {
            AssistError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_request_scoped() {
        assert!(AssistError::invalid_input("bad").is_request_scoped());
        assert!(AssistError::inference("bad").is_request_scoped());
        assert!(!AssistError::artifact("bad").is_request_scoped());
        assert!(!AssistError::from(io::Error::other("stdin closed")).is_request_scoped());
    }
}
