//! Error types for ultifocus.

use thiserror::Error;

/// Errors surfaced to callers of the focus-lock core and the CLI.
#[derive(Debug, Error)]
pub enum FocusError {
    /// A lock session is already running.
    #[error("a focus lock session is already active (session {0})")]
    AlreadyActive(String),

    /// Configuration could not be loaded, saved, or validated.
    #[error("configuration error: {0}")]
    Config(String),

    /// A requested item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A command-line or API argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The terminal could not be set up, drawn to, or restored.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Filesystem or stream failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FocusError {
    /// Exit code the binary should use for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 2,
            Self::AlreadyActive(_) => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FocusError::AlreadyActive("abc".to_string());
        assert_eq!(
            err.to_string(),
            "a focus lock session is already active (session abc)"
        );

        let err = FocusError::InvalidArgument("duration".to_string());
        assert_eq!(err.to_string(), "invalid argument: duration");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(FocusError::InvalidArgument(String::new()).exit_code(), 2);
        assert_eq!(FocusError::AlreadyActive(String::new()).exit_code(), 3);
        assert_eq!(FocusError::Config(String::new()).exit_code(), 1);
    }
}
