//! Review decisions

use serde::{Deserialize, Serialize};

use crate::status::ManuscriptStatus;

/// The outcome a reviewer records for a manuscript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewDecision {
    /// Manuscript is ready for publication
    Accepted,
    /// Author must revise and resubmit for review
    RevisionRequired,
    /// Manuscript is declined
    Rejected,
}

impl ReviewDecision {
    /// The manuscript status this decision moves to
    pub fn target_status(&self) -> ManuscriptStatus {
        match self {
            ReviewDecision::Accepted => ManuscriptStatus::Accepted,
            ReviewDecision::RevisionRequired => ManuscriptStatus::RevisionRequired,
            ReviewDecision::Rejected => ManuscriptStatus::Rejected,
        }
    }

    /// Check if this decision closes the review cycle rather than looping
    pub fn is_final(&self) -> bool {
        matches!(self, ReviewDecision::Accepted | ReviewDecision::Rejected)
    }
}

impl std::fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewDecision::Accepted => write!(f, "ACCEPTED"),
            ReviewDecision::RevisionRequired => write!(f, "REVISION_REQUIRED"),
            ReviewDecision::Rejected => write!(f, "REJECTED"),
        }
    }
}
