//! Manuscript status state machine
//!
//! State transitions:
//! ```text
//! Submitted → UnderReview → Accepted → Published → Archived
//!     ↓            ↓  ↑  ↖
//!  Rejected    Rejected   RevisionRequired
//! ```
//!
//! `RevisionRequired` may return to `UnderReview` (re-assignment for another
//! review cycle) or be re-decided directly to `Accepted`/`Rejected`.
//! `Rejected` and `Archived` are terminal.

use serde::{Deserialize, Serialize};

/// The review status of a manuscript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManuscriptStatus {
    /// Newly submitted, awaiting editorial assignment
    Submitted,
    /// Assigned to a reviewer, evaluation in progress
    UnderReview,
    /// Reviewer requested changes from the author
    RevisionRequired,
    /// Accepted for publication
    Accepted,
    /// Declined, either by review decision or editorial rejection
    Rejected,
    /// Live in the portal's publication listing
    Published,
    /// Removed from the active listing
    Archived,
}

impl ManuscriptStatus {
    /// Check if a status transition is valid
    pub fn can_transition_to(&self, target: &ManuscriptStatus) -> bool {
        match (self, target) {
            // Submitted can be assigned out for review or rejected outright
            (ManuscriptStatus::Submitted, ManuscriptStatus::UnderReview) => true,
            (ManuscriptStatus::Submitted, ManuscriptStatus::Rejected) => true,

            // UnderReview resolves to one of the three review decisions
            (ManuscriptStatus::UnderReview, ManuscriptStatus::Accepted) => true,
            (ManuscriptStatus::UnderReview, ManuscriptStatus::RevisionRequired) => true,
            (ManuscriptStatus::UnderReview, ManuscriptStatus::Rejected) => true,

            // RevisionRequired loops back for another cycle or is re-decided
            (ManuscriptStatus::RevisionRequired, ManuscriptStatus::UnderReview) => true,
            (ManuscriptStatus::RevisionRequired, ManuscriptStatus::Accepted) => true,
            (ManuscriptStatus::RevisionRequired, ManuscriptStatus::Rejected) => true,

            // Accepted manuscripts go live, published ones retire
            (ManuscriptStatus::Accepted, ManuscriptStatus::Published) => true,
            (ManuscriptStatus::Published, ManuscriptStatus::Archived) => true,

            // Rejected and Archived are terminal
            (ManuscriptStatus::Rejected, _) => false,
            (ManuscriptStatus::Archived, _) => false,

            // All other transitions are invalid
            _ => false,
        }
    }

    /// Get valid next statuses from the current status
    pub fn valid_transitions(&self) -> Vec<ManuscriptStatus> {
        match self {
            ManuscriptStatus::Submitted => {
                vec![ManuscriptStatus::UnderReview, ManuscriptStatus::Rejected]
            }
            ManuscriptStatus::UnderReview => vec![
                ManuscriptStatus::Accepted,
                ManuscriptStatus::RevisionRequired,
                ManuscriptStatus::Rejected,
            ],
            ManuscriptStatus::RevisionRequired => vec![
                ManuscriptStatus::UnderReview,
                ManuscriptStatus::Accepted,
                ManuscriptStatus::Rejected,
            ],
            ManuscriptStatus::Accepted => vec![ManuscriptStatus::Published],
            ManuscriptStatus::Published => vec![ManuscriptStatus::Archived],
            ManuscriptStatus::Rejected => vec![],
            ManuscriptStatus::Archived => vec![],
        }
    }

    /// Check if the manuscript is in a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, ManuscriptStatus::Rejected | ManuscriptStatus::Archived)
    }

    /// Check if the status accepts a review decision
    pub fn is_decidable(&self) -> bool {
        matches!(
            self,
            ManuscriptStatus::UnderReview | ManuscriptStatus::RevisionRequired
        )
    }

    /// Parse a status from its stored label
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUBMITTED" => Some(ManuscriptStatus::Submitted),
            "UNDER_REVIEW" => Some(ManuscriptStatus::UnderReview),
            "REVISION_REQUIRED" => Some(ManuscriptStatus::RevisionRequired),
            "ACCEPTED" => Some(ManuscriptStatus::Accepted),
            "REJECTED" => Some(ManuscriptStatus::Rejected),
            "PUBLISHED" => Some(ManuscriptStatus::Published),
            "ARCHIVED" => Some(ManuscriptStatus::Archived),
            _ => None,
        }
    }

    /// Get a human-readable description of the status
    pub fn description(&self) -> &'static str {
        match self {
            ManuscriptStatus::Submitted => "Awaiting editorial assignment",
            ManuscriptStatus::UnderReview => "Under peer review",
            ManuscriptStatus::RevisionRequired => "Revision requested from author",
            ManuscriptStatus::Accepted => "Accepted for publication",
            ManuscriptStatus::Rejected => "Rejected",
            ManuscriptStatus::Published => "Published",
            ManuscriptStatus::Archived => "Archived",
        }
    }
}

impl Default for ManuscriptStatus {
    fn default() -> Self {
        ManuscriptStatus::Submitted
    }
}

impl std::fmt::Display for ManuscriptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManuscriptStatus::Submitted => write!(f, "SUBMITTED"),
            ManuscriptStatus::UnderReview => write!(f, "UNDER_REVIEW"),
            ManuscriptStatus::RevisionRequired => write!(f, "REVISION_REQUIRED"),
            ManuscriptStatus::Accepted => write!(f, "ACCEPTED"),
            ManuscriptStatus::Rejected => write!(f, "REJECTED"),
            ManuscriptStatus::Published => write!(f, "PUBLISHED"),
            ManuscriptStatus::Archived => write!(f, "ARCHIVED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submitted_transitions() {
        let status = ManuscriptStatus::Submitted;
        assert!(status.can_transition_to(&ManuscriptStatus::UnderReview));
        assert!(status.can_transition_to(&ManuscriptStatus::Rejected));
        assert!(!status.can_transition_to(&ManuscriptStatus::Accepted));
        assert!(!status.can_transition_to(&ManuscriptStatus::Published));
        assert!(!status.can_transition_to(&ManuscriptStatus::Archived));
    }

    #[test]
    fn test_under_review_transitions() {
        let status = ManuscriptStatus::UnderReview;
        assert!(status.can_transition_to(&ManuscriptStatus::Accepted));
        assert!(status.can_transition_to(&ManuscriptStatus::RevisionRequired));
        assert!(status.can_transition_to(&ManuscriptStatus::Rejected));
        assert!(!status.can_transition_to(&ManuscriptStatus::Submitted));
        assert!(!status.can_transition_to(&ManuscriptStatus::Published));
    }

    #[test]
    fn test_revision_required_transitions() {
        let status = ManuscriptStatus::RevisionRequired;
        assert!(status.can_transition_to(&ManuscriptStatus::UnderReview));
        assert!(status.can_transition_to(&ManuscriptStatus::Accepted));
        assert!(status.can_transition_to(&ManuscriptStatus::Rejected));
        assert!(!status.can_transition_to(&ManuscriptStatus::Published));
    }

    #[test]
    fn test_publish_only_from_accepted() {
        for status in [
            ManuscriptStatus::Submitted,
            ManuscriptStatus::UnderReview,
            ManuscriptStatus::RevisionRequired,
            ManuscriptStatus::Rejected,
            ManuscriptStatus::Published,
            ManuscriptStatus::Archived,
        ] {
            assert!(!status.can_transition_to(&ManuscriptStatus::Published));
        }
        assert!(ManuscriptStatus::Accepted.can_transition_to(&ManuscriptStatus::Published));
    }

    #[test]
    fn test_archive_only_from_published() {
        assert!(ManuscriptStatus::Published.can_transition_to(&ManuscriptStatus::Archived));
        assert!(!ManuscriptStatus::Accepted.can_transition_to(&ManuscriptStatus::Archived));
        assert!(!ManuscriptStatus::Rejected.can_transition_to(&ManuscriptStatus::Archived));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(ManuscriptStatus::Rejected.is_terminal());
        assert!(ManuscriptStatus::Archived.is_terminal());
        assert!(!ManuscriptStatus::Published.is_terminal());
        assert!(!ManuscriptStatus::Submitted.is_terminal());
        assert!(ManuscriptStatus::Rejected.valid_transitions().is_empty());
        assert!(ManuscriptStatus::Archived.valid_transitions().is_empty());
    }

    #[test]
    fn test_display_parse_round_trip() {
        for status in [
            ManuscriptStatus::Submitted,
            ManuscriptStatus::UnderReview,
            ManuscriptStatus::RevisionRequired,
            ManuscriptStatus::Accepted,
            ManuscriptStatus::Rejected,
            ManuscriptStatus::Published,
            ManuscriptStatus::Archived,
        ] {
            assert_eq!(ManuscriptStatus::parse(&status.to_string()), Some(status));
        }
        assert_eq!(ManuscriptStatus::parse("IN_LIMBO"), None);
    }
}
