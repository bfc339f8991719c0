//! Manuscript entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decision::ReviewDecision;
use crate::status::ManuscriptStatus;

/// Unique identifier for a manuscript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManuscriptId(pub Uuid);

impl ManuscriptId {
    /// Create a new random manuscript ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a manuscript ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a manuscript ID from a string
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for ManuscriptId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ManuscriptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of work being submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperType {
    Journal,
    Book,
}

impl std::fmt::Display for PaperType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaperType::Journal => write!(f, "JOURNAL"),
            PaperType::Book => write!(f, "BOOK"),
        }
    }
}

impl PaperType {
    /// Parse a paper type from its stored label
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "JOURNAL" => Some(PaperType::Journal),
            "BOOK" => Some(PaperType::Book),
            _ => None,
        }
    }
}

/// Author-supplied fields for a new submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManuscriptDraft {
    pub title: String,
    pub abstract_text: String,
    pub discipline: String,
    pub paper_type: PaperType,
    /// Free-form sub-category (e.g. "research article", "monograph")
    pub manuscript_type: Option<String>,
    pub keywords: Vec<String>,
    pub co_authors: Vec<String>,
    /// Opaque attachment references (storage URLs)
    pub attachments: Vec<String>,
}

/// A submitted journal article or book proposal tracked through review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manuscript {
    /// Unique identifier
    pub id: ManuscriptId,
    /// Submitting author's account ID
    pub author_id: String,
    /// Submitting author's display name
    pub author_name: String,
    /// Contact address, if the author shared one
    pub author_email: Option<String>,
    pub title: String,
    pub abstract_text: String,
    pub discipline: String,
    pub paper_type: PaperType,
    pub manuscript_type: Option<String>,
    pub keywords: Vec<String>,
    pub co_authors: Vec<String>,
    /// Opaque attachment references (storage URLs)
    pub attachments: Vec<String>,
    /// Current workflow status
    pub status: ManuscriptStatus,
    /// Reviewer currently (or last) assigned, if any
    pub assigned_reviewer_id: Option<String>,
    pub assigned_reviewer_name: Option<String>,
    /// Feedback attached by the most recent decision or rejection
    pub revision_comments: Option<String>,
    /// Set once at creation
    pub submission_date: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
    /// Counter for compare-and-swap updates
    pub version: u64,
}

impl Manuscript {
    /// Create a new manuscript from an author's draft
    pub fn new(author_id: String, author_name: String, draft: ManuscriptDraft) -> Self {
        let now = Utc::now();
        Self {
            id: ManuscriptId::new(),
            author_id,
            author_name,
            author_email: None,
            title: draft.title,
            abstract_text: draft.abstract_text,
            discipline: draft.discipline,
            paper_type: draft.paper_type,
            manuscript_type: draft.manuscript_type,
            keywords: draft.keywords,
            co_authors: draft.co_authors,
            attachments: draft.attachments,
            status: ManuscriptStatus::Submitted,
            assigned_reviewer_id: None,
            assigned_reviewer_name: None,
            revision_comments: None,
            submission_date: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Set the author's contact address
    pub fn with_email(mut self, email: String) -> Self {
        self.author_email = Some(email);
        self
    }

    /// Attempt to transition to a new status.
    ///
    /// Returns the rejected target on failure so callers can report the
    /// attempted transition.
    pub fn transition_to(
        &mut self,
        new_status: ManuscriptStatus,
    ) -> Result<(), (ManuscriptStatus, ManuscriptStatus)> {
        if !self.status.can_transition_to(&new_status) {
            return Err((self.status, new_status));
        }
        self.status = new_status;
        self.touch();
        Ok(())
    }

    /// Hand the manuscript to a reviewer. Does not touch revision comments.
    pub fn assign_reviewer(&mut self, reviewer_id: String, reviewer_name: String) {
        self.assigned_reviewer_id = Some(reviewer_id);
        self.assigned_reviewer_name = Some(reviewer_name);
        self.touch();
    }

    /// Attach the feedback that accompanies a decision or rejection
    pub fn attach_comments(&mut self, comments: String) {
        self.revision_comments = Some(comments);
        self.touch();
    }

    /// Check if the given user is the assigned reviewer
    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_reviewer_id.as_deref() == Some(user_id)
    }

    /// Check if the given decision is legal from the current status
    pub fn accepts_decision(&self, decision: ReviewDecision) -> bool {
        self.status.can_transition_to(&decision.target_status())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.version += 1;
    }
}
