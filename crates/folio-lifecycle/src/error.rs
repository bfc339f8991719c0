//! Error types for lifecycle operations

use thiserror::Error;

use folio_domain::{ManuscriptId, ManuscriptStatus};
use folio_store::StoreError;

/// Result type alias for lifecycle operations
pub type Result<T> = std::result::Result<T, LifecycleError>;

/// Failures a lifecycle operation can report to the caller.
///
/// None trigger automatic retry; a failed operation leaves the manuscript in
/// its prior state.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// Missing or invalid input (e.g. blank review comments)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested transition is not legal for the current status
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        from: ManuscriptStatus,
        to: ManuscriptStatus,
    },

    /// Caller role or identity does not meet the operation's requirement
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Manuscript does not exist
    #[error("Manuscript not found: {0}")]
    NotFound(ManuscriptId),

    /// The manuscript changed under the caller; re-read and retry
    #[error("Manuscript {id} was modified concurrently (expected version {expected}, found {actual})")]
    Conflict {
        id: ManuscriptId,
        expected: u64,
        actual: u64,
    },

    /// Store I/O failure; manuscript state is unchanged
    #[error("Persistence error: {0}")]
    Persistence(StoreError),
}

impl From<StoreError> for LifecycleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => LifecycleError::NotFound(id),
            StoreError::VersionConflict {
                id,
                expected,
                actual,
            } => LifecycleError::Conflict {
                id,
                expected,
                actual,
            },
            other => LifecycleError::Persistence(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let id = ManuscriptId::new();
        assert!(matches!(
            LifecycleError::from(StoreError::NotFound(id)),
            LifecycleError::NotFound(_)
        ));
        assert!(matches!(
            LifecycleError::from(StoreError::VersionConflict {
                id,
                expected: 1,
                actual: 2
            }),
            LifecycleError::Conflict { .. }
        ));
        assert!(matches!(
            LifecycleError::from(StoreError::Storage("disk".to_string())),
            LifecycleError::Persistence(_)
        ));
    }

    #[test]
    fn test_display() {
        let err = LifecycleError::InvalidTransition {
            from: ManuscriptStatus::Submitted,
            to: ManuscriptStatus::Published,
        };
        assert_eq!(
            err.to_string(),
            "Invalid transition from SUBMITTED to PUBLISHED"
        );
    }
}
