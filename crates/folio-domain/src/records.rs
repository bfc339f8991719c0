//! Flat records surrounding the manuscript workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decision::ReviewDecision;
use crate::manuscript::{Manuscript, ManuscriptId, PaperType};
use crate::role::Role;

/// A portal user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
}

/// A recorded review decision (decision history, not workflow state)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub manuscript_id: ManuscriptId,
    pub reviewer_id: String,
    pub reviewer_name: String,
    pub decision: ReviewDecision,
    pub comments: String,
    pub decided_at: DateTime<Utc>,
}

impl Review {
    /// Record a decision made on a manuscript
    pub fn new(
        manuscript_id: ManuscriptId,
        reviewer_id: String,
        reviewer_name: String,
        decision: ReviewDecision,
        comments: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            manuscript_id,
            reviewer_id,
            reviewer_name,
            decision,
            comments,
            decided_at: Utc::now(),
        }
    }
}

/// A snapshot of a manuscript in the public publication listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedWork {
    pub id: Uuid,
    pub manuscript_id: ManuscriptId,
    pub title: String,
    pub abstract_text: String,
    pub discipline: String,
    pub paper_type: PaperType,
    pub author_name: String,
    pub co_authors: Vec<String>,
    pub attachments: Vec<String>,
    pub published_at: DateTime<Utc>,
}

impl PublishedWork {
    /// Snapshot an accepted manuscript for the listing
    pub fn from_manuscript(manuscript: &Manuscript) -> Self {
        Self {
            id: Uuid::new_v4(),
            manuscript_id: manuscript.id,
            title: manuscript.title.clone(),
            abstract_text: manuscript.abstract_text.clone(),
            discipline: manuscript.discipline.clone(),
            paper_type: manuscript.paper_type,
            author_name: manuscript.author_name.clone(),
            co_authors: manuscript.co_authors.clone(),
            attachments: manuscript.attachments.clone(),
            published_at: Utc::now(),
        }
    }
}
