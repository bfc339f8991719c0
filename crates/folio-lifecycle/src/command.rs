//! Lifecycle commands
//!
//! One serializable entry point for the discrete user actions the portal UI
//! issues (button presses). Each command maps to a single manager operation.

use serde::{Deserialize, Serialize};

use folio_domain::{Manuscript, ManuscriptDraft, ManuscriptId, ReviewDecision};

use crate::error::Result;
use crate::manager::LifecycleManager;

/// Commands that can be executed against the lifecycle manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LifecycleCommand {
    /// Create a manuscript from an author's draft
    Submit { draft: ManuscriptDraft },

    /// Hand a submitted manuscript to a reviewer
    Assign {
        manuscript_id: ManuscriptId,
        reviewer_id: String,
        reviewer_name: String,
    },

    /// Record a review decision with its feedback
    Decide {
        manuscript_id: ManuscriptId,
        decision: ReviewDecision,
        comments: String,
    },

    /// Reject a submitted manuscript without assignment
    Reject {
        manuscript_id: ManuscriptId,
        comments: String,
    },

    /// Move an accepted manuscript into the publication listing
    Publish { manuscript_id: ManuscriptId },

    /// Retire a published manuscript from the listing
    Archive { manuscript_id: ManuscriptId },

    /// Destructive admin override
    Delete { manuscript_id: ManuscriptId },
}

impl LifecycleCommand {
    /// Execute the command. Returns the updated manuscript, or None for
    /// deletion.
    pub fn execute(self, manager: &LifecycleManager) -> Result<Option<Manuscript>> {
        match self {
            LifecycleCommand::Submit { draft } => manager.submit(draft).map(Some),
            LifecycleCommand::Assign {
                manuscript_id,
                reviewer_id,
                reviewer_name,
            } => manager
                .assign(manuscript_id, &reviewer_id, &reviewer_name)
                .map(Some),
            LifecycleCommand::Decide {
                manuscript_id,
                decision,
                comments,
            } => manager.decide(manuscript_id, decision, &comments).map(Some),
            LifecycleCommand::Reject {
                manuscript_id,
                comments,
            } => manager.reject(manuscript_id, &comments).map(Some),
            LifecycleCommand::Publish { manuscript_id } => {
                manager.publish(manuscript_id).map(Some)
            }
            LifecycleCommand::Archive { manuscript_id } => {
                manager.archive(manuscript_id).map(Some)
            }
            LifecycleCommand::Delete { manuscript_id } => {
                manager.delete(manuscript_id).map(|_| None)
            }
        }
    }
}
