//! The trait that all storage backends implement

use folio_domain::{
    Manuscript, ManuscriptId, ManuscriptStatus, PublishedWork, Review, UserProfile,
};

use crate::error::StoreError;

/// Durable tables behind the portal: manuscripts, reviews, published works,
/// and user profiles.
///
/// Manuscript updates take the version the caller read; the write succeeds
/// only when the stored version still matches.
pub trait PortalStore: Send + Sync {
    /// Insert a new manuscript. Fails if the ID is already present.
    fn insert_manuscript(&self, manuscript: &Manuscript) -> Result<(), StoreError>;

    /// Get a manuscript by ID.
    fn get_manuscript(&self, id: ManuscriptId) -> Result<Option<Manuscript>, StoreError>;

    /// Get all manuscripts, newest submission first.
    fn list_manuscripts(&self) -> Result<Vec<Manuscript>, StoreError>;

    /// Get manuscripts in the given status.
    fn manuscripts_by_status(
        &self,
        status: ManuscriptStatus,
    ) -> Result<Vec<Manuscript>, StoreError>;

    /// Get manuscripts submitted by the given author.
    fn manuscripts_by_author(&self, author_id: &str) -> Result<Vec<Manuscript>, StoreError>;

    /// Get manuscripts assigned to the given reviewer.
    fn manuscripts_by_reviewer(&self, reviewer_id: &str) -> Result<Vec<Manuscript>, StoreError>;

    /// Replace a manuscript row if its stored version equals `expected_version`.
    fn update_manuscript(
        &self,
        manuscript: &Manuscript,
        expected_version: u64,
    ) -> Result<(), StoreError>;

    /// Delete a manuscript by ID.
    fn delete_manuscript(&self, id: ManuscriptId) -> Result<(), StoreError>;

    /// Record a review decision.
    fn insert_review(&self, review: &Review) -> Result<(), StoreError>;

    /// Get the decision history for a manuscript, oldest first.
    fn reviews_for_manuscript(&self, id: ManuscriptId) -> Result<Vec<Review>, StoreError>;

    /// Add a work to the publication listing.
    fn insert_published_work(&self, work: &PublishedWork) -> Result<(), StoreError>;

    /// Get the publication listing, newest first.
    fn list_published_works(&self) -> Result<Vec<PublishedWork>, StoreError>;

    /// Insert or replace a user profile.
    fn upsert_user(&self, user: &UserProfile) -> Result<(), StoreError>;

    /// Get a user profile by account ID.
    fn get_user(&self, id: &str) -> Result<Option<UserProfile>, StoreError>;
}
