use std::io;
use std::time::Duration;
use thiserror::Error;

/// Failure taxonomy for everything that touches the `cwctl` executable.
///
/// Messages carry the most specific text available: JSON message fields
/// first, then raw stderr, then raw stdout, then a templated fallback.
#[derive(Error, Debug)]
pub enum CwError {
    /// Bundled executable missing, install directory or permission failure
    #[error("Install error: {message}")]
    Install { kind: io::ErrorKind, message: String },

    /// The process exited with a non-zero code
    #[error("{message}")]
    Process { exit_code: i32, message: String },

    /// The process succeeded but printed nothing where output was required
    #[error("{0}")]
    EmptyOutput(String),

    /// Exit code 0 but the JSON payload signalled an error or a non-OK status
    #[error("{message}")]
    Protocol {
        status: Option<String>,
        message: String,
    },

    /// The wait budget ran out; the process has been killed
    #[error("{message}")]
    Timeout { budget: Duration, message: String },

    /// The process could not be started or waited on
    #[error("{0}")]
    Spawn(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CwError {
    pub fn install(kind: io::ErrorKind, message: impl Into<String>) -> Self {
        Self::Install {
            kind,
            message: message.into(),
        }
    }

    /// The human-readable message without a category prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Install { message, .. }
            | Self::Process { message, .. }
            | Self::Protocol { message, .. }
            | Self::Timeout { message, .. } => message.clone(),
            Self::EmptyOutput(s)
            | Self::Spawn(s)
            | Self::Serialization(s)
            | Self::Config(s)
            | Self::Internal(s) => s.clone(),
            Self::Io(e) => e.to_string(),
        }
    }

    /// I/O kind for install and raw I/O failures.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Install { kind, .. } => Some(*kind),
            Self::Io(e) => Some(e.kind()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<serde_json::Error> for CwError {
    fn from(err: serde_json::Error) -> Self {
        CwError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CwError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_displays_bare_message() {
        let err = CwError::Process {
            exit_code: 2,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.message(), "connection refused");
    }

    #[test]
    fn test_install_error_keeps_kind() {
        let err = CwError::install(io::ErrorKind::NotFound, "missing cwctl");
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert!(err.to_string().contains("missing cwctl"));
    }

    #[test]
    fn test_json_error_becomes_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CwError = json_err.into();
        assert!(matches!(err, CwError::Serialization(_)));
    }
}
