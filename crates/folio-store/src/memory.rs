//! In-memory store for tests and embedding

use std::collections::HashMap;
use std::sync::RwLock;

use folio_domain::{
    Manuscript, ManuscriptId, ManuscriptStatus, PublishedWork, Review, UserProfile,
};

use crate::error::StoreError;
use crate::store::PortalStore;

#[derive(Default)]
struct Tables {
    manuscripts: HashMap<ManuscriptId, Manuscript>,
    reviews: Vec<Review>,
    published: Vec<PublishedWork>,
    users: HashMap<String, UserProfile>,
}

/// In-memory implementation of the PortalStore trait
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|e| StoreError::Storage(e.to_string()))
    }
}

impl PortalStore for MemoryStore {
    fn insert_manuscript(&self, manuscript: &Manuscript) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        if tables.manuscripts.contains_key(&manuscript.id) {
            return Err(StoreError::AlreadyExists(manuscript.id));
        }
        tables.manuscripts.insert(manuscript.id, manuscript.clone());
        Ok(())
    }

    fn get_manuscript(&self, id: ManuscriptId) -> Result<Option<Manuscript>, StoreError> {
        Ok(self.read()?.manuscripts.get(&id).cloned())
    }

    fn list_manuscripts(&self) -> Result<Vec<Manuscript>, StoreError> {
        let tables = self.read()?;
        let mut all: Vec<Manuscript> = tables.manuscripts.values().cloned().collect();
        all.sort_by(|a, b| b.submission_date.cmp(&a.submission_date));
        Ok(all)
    }

    fn manuscripts_by_status(
        &self,
        status: ManuscriptStatus,
    ) -> Result<Vec<Manuscript>, StoreError> {
        let mut matching: Vec<Manuscript> = self
            .read()?
            .manuscripts
            .values()
            .filter(|m| m.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.submission_date.cmp(&a.submission_date));
        Ok(matching)
    }

    fn manuscripts_by_author(&self, author_id: &str) -> Result<Vec<Manuscript>, StoreError> {
        let mut matching: Vec<Manuscript> = self
            .read()?
            .manuscripts
            .values()
            .filter(|m| m.author_id == author_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.submission_date.cmp(&a.submission_date));
        Ok(matching)
    }

    fn manuscripts_by_reviewer(&self, reviewer_id: &str) -> Result<Vec<Manuscript>, StoreError> {
        let mut matching: Vec<Manuscript> = self
            .read()?
            .manuscripts
            .values()
            .filter(|m| m.assigned_reviewer_id.as_deref() == Some(reviewer_id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.submission_date.cmp(&a.submission_date));
        Ok(matching)
    }

    fn update_manuscript(
        &self,
        manuscript: &Manuscript,
        expected_version: u64,
    ) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        let current = tables
            .manuscripts
            .get(&manuscript.id)
            .ok_or(StoreError::NotFound(manuscript.id))?;
        if current.version != expected_version {
            return Err(StoreError::VersionConflict {
                id: manuscript.id,
                expected: expected_version,
                actual: current.version,
            });
        }
        tables.manuscripts.insert(manuscript.id, manuscript.clone());
        Ok(())
    }

    fn delete_manuscript(&self, id: ManuscriptId) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        tables
            .manuscripts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn insert_review(&self, review: &Review) -> Result<(), StoreError> {
        self.write()?.reviews.push(review.clone());
        Ok(())
    }

    fn reviews_for_manuscript(&self, id: ManuscriptId) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .read()?
            .reviews
            .iter()
            .filter(|r| r.manuscript_id == id)
            .cloned()
            .collect())
    }

    fn insert_published_work(&self, work: &PublishedWork) -> Result<(), StoreError> {
        self.write()?.published.push(work.clone());
        Ok(())
    }

    fn list_published_works(&self) -> Result<Vec<PublishedWork>, StoreError> {
        let mut works = self.read()?.published.clone();
        works.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(works)
    }

    fn upsert_user(&self, user: &UserProfile) -> Result<(), StoreError> {
        self.write()?.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    fn get_user(&self, id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.read()?.users.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_domain::{ManuscriptDraft, PaperType};

    fn sample_manuscript(author_id: &str) -> Manuscript {
        Manuscript::new(
            author_id.to_string(),
            "Ada".to_string(),
            ManuscriptDraft {
                title: "On Computable Numbers".to_string(),
                abstract_text: "An abstract.".to_string(),
                discipline: "Mathematics".to_string(),
                paper_type: PaperType::Journal,
                manuscript_type: None,
                keywords: vec![],
                co_authors: vec![],
                attachments: vec![],
            },
        )
    }

    #[test]
    fn test_insert_and_get() {
        let store = MemoryStore::new();
        let m = sample_manuscript("u-1");
        store.insert_manuscript(&m).unwrap();
        let fetched = store.get_manuscript(m.id).unwrap().unwrap();
        assert_eq!(fetched.title, m.title);
    }

    #[test]
    fn test_double_insert_fails() {
        let store = MemoryStore::new();
        let m = sample_manuscript("u-1");
        store.insert_manuscript(&m).unwrap();
        assert!(matches!(
            store.insert_manuscript(&m),
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_cas_update() {
        let store = MemoryStore::new();
        let mut m = sample_manuscript("u-1");
        store.insert_manuscript(&m).unwrap();

        m.transition_to(ManuscriptStatus::UnderReview).unwrap();
        store.update_manuscript(&m, 0).unwrap();

        // A stale writer still holding version 0 loses
        let mut stale = store.get_manuscript(m.id).unwrap().unwrap();
        stale.version = 5;
        let err = store.update_manuscript(&stale, 0).unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { actual: 1, .. }));

        // Row is unchanged by the failed write
        let current = store.get_manuscript(m.id).unwrap().unwrap();
        assert_eq!(current.version, 1);
        assert_eq!(current.status, ManuscriptStatus::UnderReview);
    }

    #[test]
    fn test_filters() {
        let store = MemoryStore::new();
        let mut a = sample_manuscript("author-1");
        let b = sample_manuscript("author-2");
        a.assign_reviewer("prof-1".to_string(), "Prof".to_string());
        store.insert_manuscript(&a).unwrap();
        store.insert_manuscript(&b).unwrap();

        assert_eq!(store.manuscripts_by_author("author-1").unwrap().len(), 1);
        assert_eq!(store.manuscripts_by_reviewer("prof-1").unwrap().len(), 1);
        assert_eq!(store.manuscripts_by_reviewer("prof-2").unwrap().len(), 0);
        assert_eq!(
            store
                .manuscripts_by_status(ManuscriptStatus::Submitted)
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        let m = sample_manuscript("u-1");
        store.insert_manuscript(&m).unwrap();
        store.delete_manuscript(m.id).unwrap();
        assert!(store.get_manuscript(m.id).unwrap().is_none());
        assert!(matches!(
            store.delete_manuscript(m.id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_users_round_trip() {
        let store = MemoryStore::new();
        let user = UserProfile {
            id: "u-1".to_string(),
            name: "Ada".to_string(),
            email: Some("ada@example.org".to_string()),
            role: folio_domain::Role::User,
        };
        store.upsert_user(&user).unwrap();
        assert_eq!(store.get_user("u-1").unwrap().unwrap().name, "Ada");
        assert!(store.get_user("u-2").unwrap().is_none());
    }
}
