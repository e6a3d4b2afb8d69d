//! # Store Error Types
//!
//! Error types for record store and service operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (rule failure inside a section)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError::Core ──────────┐                                           │
//! │                             ├──► caller decides (retry, show, abort)    │
//! │  std::io / serde_json error │                                           │
//! │       │                     │                                           │
//! │       ▼                     │                                           │
//! │  StoreError::PersistenceFailed (adds path + what was being done)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use dealer_core::{CoreError, ErrorKind};
use thiserror::Error;

/// Store and service errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A business rule rejected the operation. Nothing was persisted.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backing file could not be read, parsed or written.
    ///
    /// ## When This Occurs
    /// - File exists but is not valid JSON, or a record is missing a
    ///   required field (`load`)
    /// - Directory not writable, disk full (`save`)
    ///
    /// After a failed `save` the in-memory state already holds the mutation
    /// while the file does not.
    #[error("Persistence failed for {}: {reason}", .path.display())]
    PersistenceFailed { path: PathBuf, reason: String },

    /// A legacy data file has a shape migration cannot read.
    #[error("Legacy data rejected: {0}")]
    Migration(String),

    /// Migration would overwrite an existing file without `--force`.
    #[error("Refusing to overwrite {}", .0.display())]
    OutputExists(PathBuf),

    /// Configuration file unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A thread panicked while holding the store lock.
    #[error("Record store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Creates a PersistenceFailed error for `path`.
    pub fn persistence(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        StoreError::PersistenceFailed {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Returns the taxonomy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Core(err) => err.kind(),
            StoreError::PersistenceFailed { .. } | StoreError::LockPoisoned => {
                ErrorKind::PersistenceFailed
            }
            StoreError::Migration(_) | StoreError::Config(_) => ErrorKind::ValidationFailed,
            StoreError::OutputExists(_) => ErrorKind::Conflict,
        }
    }

    /// The wrapped rule failure, if this is one.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            StoreError::Core(err) => Some(err),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_delegates_to_core() {
        let err = StoreError::from(CoreError::VehicleNotFound("car-1".into()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.as_core().is_some());
        assert_eq!(err.to_string(), "Vehicle not found: car-1");
    }

    #[test]
    fn test_persistence_error() {
        let err = StoreError::persistence("/tmp/data.json", "disk full");
        assert_eq!(err.kind(), ErrorKind::PersistenceFailed);
        assert_eq!(
            err.to_string(),
            "Persistence failed for /tmp/data.json: disk full"
        );
    }
}
