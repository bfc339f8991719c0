//! Errors from the portal store

use folio_domain::ManuscriptId;

/// Errors from a store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Manuscript not found: {0}")]
    NotFound(ManuscriptId),

    #[error("Manuscript already exists: {0}")]
    AlreadyExists(ManuscriptId),

    #[error("Version conflict on {id}: expected {expected}, found {actual}")]
    VersionConflict {
        id: ManuscriptId,
        expected: u64,
        actual: u64,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let id = ManuscriptId::new();
        let err = StoreError::NotFound(id);
        assert!(err.to_string().contains("not found"));

        let err = StoreError::VersionConflict {
            id,
            expected: 2,
            actual: 3,
        };
        assert!(err.to_string().contains("expected 2"));
        assert!(err.to_string().contains("found 3"));
    }
}
