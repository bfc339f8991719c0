//! The manuscript lifecycle manager
//!
//! Orchestrates every workflow operation: role gate, input validation,
//! state-machine check, compare-and-swap write, side records, and one
//! advisory notification per operation.

use std::sync::Arc;

use folio_domain::{
    is_submittable, validate_draft, Manuscript, ManuscriptDraft, ManuscriptId, ManuscriptStatus,
    PublishedWork, Review, ReviewDecision, ValidationSeverity,
};
use folio_store::PortalStore;

use crate::config::PortalConfig;
use crate::error::{LifecycleError, Result};
use crate::identity::{IdentityProvider, Session};
use crate::notify::{Notification, Notifier, Severity};

/// The lifecycle service. Constructed once with its injected collaborators
/// and passed explicitly to whatever drives it.
pub struct LifecycleManager {
    store: Arc<dyn PortalStore>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    config: PortalConfig,
}

impl LifecycleManager {
    /// Create a manager with default configuration
    pub fn new(
        store: Arc<dyn PortalStore>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_config(store, identity, notifier, PortalConfig::default())
    }

    /// Create a manager with explicit configuration
    pub fn with_config(
        store: Arc<dyn PortalStore>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
        config: PortalConfig,
    ) -> Self {
        Self {
            store,
            identity,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    // ==================== Lifecycle operations ====================

    /// Create a manuscript from an author's draft. Any authenticated caller.
    pub fn submit(&self, draft: ManuscriptDraft) -> Result<Manuscript> {
        let result = self.submit_inner(draft);
        self.report("Submission", &result, |m| {
            format!("Manuscript \"{}\" submitted for review", m.title)
        });
        result
    }

    fn submit_inner(&self, draft: ManuscriptDraft) -> Result<Manuscript> {
        let session = self.require_session()?;

        if !is_submittable(&draft) {
            let missing: Vec<String> = validate_draft(&draft)
                .into_iter()
                .filter(|f| f.severity == ValidationSeverity::Error)
                .map(|f| f.message)
                .collect();
            return Err(LifecycleError::Validation(missing.join("; ")));
        }

        let manuscript = Manuscript::new(session.user_id, session.display_name, draft);
        self.store.insert_manuscript(&manuscript)?;

        tracing::info!(manuscript = %manuscript.id, "manuscript submitted");
        Ok(manuscript)
    }

    /// Hand a submitted manuscript to a reviewer. Admin only.
    pub fn assign(
        &self,
        id: ManuscriptId,
        reviewer_id: &str,
        reviewer_name: &str,
    ) -> Result<Manuscript> {
        let result = self.assign_inner(id, reviewer_id, reviewer_name);
        self.report("Assignment", &result, |m| {
            format!("Manuscript \"{}\" assigned to {}", m.title, reviewer_name)
        });
        result
    }

    fn assign_inner(
        &self,
        id: ManuscriptId,
        reviewer_id: &str,
        reviewer_name: &str,
    ) -> Result<Manuscript> {
        self.require_admin("assign a reviewer")?;
        let mut manuscript = self.load(id)?;
        let expected = manuscript.version;

        if manuscript.status == ManuscriptStatus::RevisionRequired
            && !self.config.workflow.allow_reassign_after_revision
        {
            return Err(LifecycleError::InvalidTransition {
                from: manuscript.status,
                to: ManuscriptStatus::UnderReview,
            });
        }

        manuscript
            .transition_to(ManuscriptStatus::UnderReview)
            .map_err(|(from, to)| LifecycleError::InvalidTransition { from, to })?;
        manuscript.assign_reviewer(reviewer_id.to_string(), reviewer_name.to_string());
        self.store.update_manuscript(&manuscript, expected)?;

        tracing::info!(manuscript = %manuscript.id, reviewer = reviewer_id, "reviewer assigned");
        Ok(manuscript)
    }

    /// Record a review decision. The assigned reviewer, or an admin when the
    /// override flag allows it. Comments are required for every outcome.
    pub fn decide(
        &self,
        id: ManuscriptId,
        decision: ReviewDecision,
        comments: &str,
    ) -> Result<Manuscript> {
        let result = self.decide_inner(id, decision, comments);
        self.report("Review decision", &result, |m| {
            format!("Manuscript \"{}\" marked {}", m.title, decision)
        });
        result
    }

    fn decide_inner(
        &self,
        id: ManuscriptId,
        decision: ReviewDecision,
        comments: &str,
    ) -> Result<Manuscript> {
        let session = self.require_session()?;

        // Blank feedback is a validation failure regardless of status
        if comments.trim().is_empty() {
            return Err(LifecycleError::Validation(
                "Review comments are required".to_string(),
            ));
        }

        let mut manuscript = self.load(id)?;
        let expected = manuscript.version;
        self.check_decision_rights(&session, &manuscript)?;

        if manuscript.status == ManuscriptStatus::RevisionRequired
            && !self.config.workflow.allow_fast_track_from_revision
        {
            return Err(LifecycleError::InvalidTransition {
                from: manuscript.status,
                to: decision.target_status(),
            });
        }

        manuscript
            .transition_to(decision.target_status())
            .map_err(|(from, to)| LifecycleError::InvalidTransition { from, to })?;
        manuscript.attach_comments(comments.to_string());
        self.store.update_manuscript(&manuscript, expected)?;

        let review = Review::new(
            manuscript.id,
            session.user_id,
            session.display_name,
            decision,
            comments.to_string(),
        );
        self.store.insert_review(&review)?;

        tracing::info!(
            manuscript = %manuscript.id,
            decision = %decision,
            "review decision recorded"
        );
        Ok(manuscript)
    }

    /// Reject a submitted manuscript without assigning it. Admin shortcut.
    pub fn reject(&self, id: ManuscriptId, comments: &str) -> Result<Manuscript> {
        let result = self.reject_inner(id, comments);
        self.report("Rejection", &result, |m| {
            format!("Manuscript \"{}\" rejected", m.title)
        });
        result
    }

    fn reject_inner(&self, id: ManuscriptId, comments: &str) -> Result<Manuscript> {
        self.require_admin("reject a manuscript")?;

        if comments.trim().is_empty() {
            return Err(LifecycleError::Validation(
                "Rejection comments are required".to_string(),
            ));
        }

        let mut manuscript = self.load(id)?;
        let expected = manuscript.version;

        // The shortcut only applies before assignment; a manuscript under
        // review is rejected through decide()
        if manuscript.status != ManuscriptStatus::Submitted {
            return Err(LifecycleError::InvalidTransition {
                from: manuscript.status,
                to: ManuscriptStatus::Rejected,
            });
        }

        manuscript
            .transition_to(ManuscriptStatus::Rejected)
            .map_err(|(from, to)| LifecycleError::InvalidTransition { from, to })?;
        manuscript.attach_comments(comments.to_string());
        self.store.update_manuscript(&manuscript, expected)?;

        tracing::info!(manuscript = %manuscript.id, "manuscript rejected before assignment");
        Ok(manuscript)
    }

    /// Move an accepted manuscript into the publication listing. Admin only.
    pub fn publish(&self, id: ManuscriptId) -> Result<Manuscript> {
        let result = self.publish_inner(id);
        self.report("Publication", &result, |m| {
            format!("Manuscript \"{}\" is now published", m.title)
        });
        result
    }

    fn publish_inner(&self, id: ManuscriptId) -> Result<Manuscript> {
        self.require_admin("publish a manuscript")?;
        let mut manuscript = self.load(id)?;
        let expected = manuscript.version;

        manuscript
            .transition_to(ManuscriptStatus::Published)
            .map_err(|(from, to)| LifecycleError::InvalidTransition { from, to })?;
        self.store.update_manuscript(&manuscript, expected)?;
        self.store
            .insert_published_work(&PublishedWork::from_manuscript(&manuscript))?;

        tracing::info!(manuscript = %manuscript.id, "manuscript published");
        Ok(manuscript)
    }

    /// Retire a published manuscript from the active listing. Admin only.
    pub fn archive(&self, id: ManuscriptId) -> Result<Manuscript> {
        let result = self.archive_inner(id);
        self.report("Archival", &result, |m| {
            format!("Manuscript \"{}\" archived", m.title)
        });
        result
    }

    fn archive_inner(&self, id: ManuscriptId) -> Result<Manuscript> {
        self.require_admin("archive a manuscript")?;
        let mut manuscript = self.load(id)?;
        let expected = manuscript.version;

        manuscript
            .transition_to(ManuscriptStatus::Archived)
            .map_err(|(from, to)| LifecycleError::InvalidTransition { from, to })?;
        self.store.update_manuscript(&manuscript, expected)?;

        tracing::info!(manuscript = %manuscript.id, "manuscript archived");
        Ok(manuscript)
    }

    /// Destructive admin override, not part of the lifecycle.
    pub fn delete(&self, id: ManuscriptId) -> Result<()> {
        let result = self.delete_inner(id);
        self.report("Deletion", &result, |_| {
            "Manuscript deleted permanently".to_string()
        });
        result
    }

    fn delete_inner(&self, id: ManuscriptId) -> Result<()> {
        self.require_admin("delete a manuscript")?;
        self.store.delete_manuscript(id)?;
        tracing::warn!(manuscript = %id, "manuscript deleted by admin override");
        Ok(())
    }

    // ==================== Read paths ====================

    /// Get a manuscript by ID. Any authenticated caller.
    pub fn get(&self, id: ManuscriptId) -> Result<Manuscript> {
        self.require_session()?;
        self.load(id)
    }

    /// All manuscripts, for the editorial dashboard. Admin only.
    pub fn all_manuscripts(&self) -> Result<Vec<Manuscript>> {
        self.require_admin("list all manuscripts")?;
        Ok(self.store.list_manuscripts()?)
    }

    /// Manuscripts in the given status. Admin only.
    pub fn manuscripts_by_status(&self, status: ManuscriptStatus) -> Result<Vec<Manuscript>> {
        self.require_admin("filter manuscripts by status")?;
        Ok(self.store.manuscripts_by_status(status)?)
    }

    /// The caller's own submissions.
    pub fn my_manuscripts(&self) -> Result<Vec<Manuscript>> {
        let session = self.require_session()?;
        Ok(self.store.manuscripts_by_author(&session.user_id)?)
    }

    /// Manuscripts assigned to the caller for review.
    pub fn review_queue(&self) -> Result<Vec<Manuscript>> {
        let session = self.require_session()?;
        if !session.role.can_review() {
            return Err(LifecycleError::PermissionDenied(
                "only reviewers have a review queue".to_string(),
            ));
        }
        Ok(self.store.manuscripts_by_reviewer(&session.user_id)?)
    }

    /// Decision history for a manuscript. Any authenticated caller.
    pub fn reviews_for(&self, id: ManuscriptId) -> Result<Vec<Review>> {
        self.require_session()?;
        Ok(self.store.reviews_for_manuscript(id)?)
    }

    /// The public publication listing. No authentication required.
    pub fn published_listing(&self) -> Result<Vec<PublishedWork>> {
        Ok(self.store.list_published_works()?)
    }

    // ==================== Internals ====================

    fn require_session(&self) -> Result<Session> {
        self.identity.current_user().ok_or_else(|| {
            LifecycleError::PermissionDenied("authentication required".to_string())
        })
    }

    fn require_admin(&self, action: &str) -> Result<Session> {
        let session = self.require_session()?;
        if !session.role.is_admin() {
            return Err(LifecycleError::PermissionDenied(format!(
                "only an admin may {}",
                action
            )));
        }
        Ok(session)
    }

    fn check_decision_rights(&self, session: &Session, manuscript: &Manuscript) -> Result<()> {
        if manuscript.is_assigned_to(&session.user_id) {
            return Ok(());
        }
        if session.role.is_admin() && self.config.workflow.allow_admin_decision_override {
            return Ok(());
        }
        Err(LifecycleError::PermissionDenied(
            "only the assigned reviewer may decide this manuscript".to_string(),
        ))
    }

    fn load(&self, id: ManuscriptId) -> Result<Manuscript> {
        self.store
            .get_manuscript(id)?
            .ok_or(LifecycleError::NotFound(id))
    }

    fn report<T>(&self, title: &str, result: &Result<T>, success: impl FnOnce(&T) -> String) {
        let notification = match result {
            Ok(value) => Notification::new(title, success(value), Severity::Success),
            Err(err) => Notification::new(title, err.to_string(), Severity::Error),
        };
        self.notifier.notify(notification);
    }
}
