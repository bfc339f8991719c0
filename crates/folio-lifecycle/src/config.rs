//! Configuration for the lifecycle manager
//!
//! The review workflow has two ambiguous corners (re-decision of a
//! revision-required manuscript, admin decision override). Both are expressed
//! as explicit flags here rather than silently picking one behavior.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Portal-wide configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Review workflow flags
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

/// Flags controlling the edges of the review workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Allow an admin to record a decision on a manuscript assigned to
    /// someone else
    #[serde(default = "default_true")]
    pub allow_admin_decision_override: bool,

    /// Allow a decision directly on a revision-required manuscript without
    /// re-assignment (fast-track acceptance/rejection)
    #[serde(default = "default_true")]
    pub allow_fast_track_from_revision: bool,

    /// Allow re-assignment of a revision-required manuscript for a second
    /// review cycle
    #[serde(default)]
    pub allow_reassign_after_revision: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            allow_admin_decision_override: true,
            allow_fast_track_from_revision: true,
            allow_reassign_after_revision: false,
        }
    }
}

/// Errors loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl PortalConfig {
    /// Load configuration from a TOML file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PortalConfig::default();
        assert!(config.workflow.allow_admin_decision_override);
        assert!(config.workflow.allow_fast_track_from_revision);
        assert!(!config.workflow.allow_reassign_after_revision);
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[workflow]\nallow_fast_track_from_revision = false\nallow_reassign_after_revision = true"
        )
        .unwrap();

        let config = PortalConfig::load_from(file.path()).unwrap();
        assert!(!config.workflow.allow_fast_track_from_revision);
        assert!(config.workflow.allow_reassign_after_revision);
        // Unspecified flags keep their defaults
        assert!(config.workflow.allow_admin_decision_override);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = PortalConfig::load_from(file.path()).unwrap();
        assert!(config.workflow.allow_admin_decision_override);
    }
}
