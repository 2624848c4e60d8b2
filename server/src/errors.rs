//! Error types for the schedule store
//!
//! Store operations return [`StoreError`]; the web layer maps each variant to
//! the nearest HTTP status. Startup code keeps using `anyhow`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Main error type for store and backup operations
#[derive(Debug)]
pub enum StoreError {
    /// Request payload is not valid JSON
    InvalidInput { reason: String },

    /// Filesystem operation failed
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// Stored document could not be encoded or decoded
    Serialization { path: PathBuf, reason: String },
}

impl StoreError {
    pub fn invalid_input(err: impl fmt::Display) -> Self {
        StoreError::InvalidInput {
            reason: err.to_string(),
        }
    }

    pub fn io(path: &Path, operation: &'static str, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            operation,
            source,
        }
    }

    pub fn serialization(path: &Path, err: impl fmt::Display) -> Self {
        StoreError::Serialization {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }

    /// True when the caller sent bad input (HTTP 4xx), false for server-side failures
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::InvalidInput { .. })
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidInput { reason } => write!(f, "Invalid JSON: {}", reason),
            StoreError::Io {
                path,
                operation,
                source,
            } => {
                write!(f, "Failed to {} '{}': {}", operation, path.display(), source)
            }
            StoreError::Serialization { path, reason } => {
                write!(f, "Failed to encode/decode '{}': {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_is_client_error() {
        let err = StoreError::invalid_input("expected value at line 1 column 6");
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Invalid JSON: expected value at line 1 column 6"
        );
    }

    #[test]
    fn io_error_names_path_and_operation() {
        let err = StoreError::io(
            Path::new("/tmp/schedule_data.json"),
            "write",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert!(!err.is_client_error());
        let msg = err.to_string();
        assert!(msg.contains("write"));
        assert!(msg.contains("/tmp/schedule_data.json"));
        assert!(msg.contains("permission denied"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn serialization_message_covers_both_directions() {
        let err = StoreError::serialization(
            Path::new("/config/shift_schedule/schedule_data.json"),
            "EOF while parsing an object at line 1 column 12",
        );
        assert!(!err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Failed to encode/decode '/config/shift_schedule/schedule_data.json': \
             EOF while parsing an object at line 1 column 12"
        );
    }
}
