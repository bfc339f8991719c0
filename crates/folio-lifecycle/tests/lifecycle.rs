//! End-to-end lifecycle scenarios over the in-memory store

use std::sync::Arc;

use folio_domain::{ManuscriptDraft, ManuscriptStatus, PaperType, ReviewDecision, Role};
use folio_lifecycle::{
    LifecycleCommand, LifecycleError, LifecycleManager, MemoryNotifier, Session, StaticIdentity,
};
use folio_store::MemoryStore;

struct Portal {
    manager: LifecycleManager,
    identity: Arc<StaticIdentity>,
    notifier: Arc<MemoryNotifier>,
}

fn portal() -> Portal {
    let identity = Arc::new(StaticIdentity::anonymous());
    let notifier = Arc::new(MemoryNotifier::new());
    let manager = LifecycleManager::new(
        Arc::new(MemoryStore::new()),
        identity.clone(),
        notifier.clone(),
    );
    Portal {
        manager,
        identity,
        notifier,
    }
}

fn journal_draft(title: &str) -> ManuscriptDraft {
    ManuscriptDraft {
        title: title.to_string(),
        abstract_text: "An abstract.".to_string(),
        discipline: "Physics".to_string(),
        paper_type: PaperType::Journal,
        manuscript_type: Some("research article".to_string()),
        keywords: vec!["physics".to_string()],
        co_authors: vec![],
        attachments: vec!["https://example.org/paper.pdf".to_string()],
    }
}

fn sign_in_author(portal: &Portal) {
    portal
        .identity
        .sign_in(Session::new("author-1", "Ada", Role::User));
}

fn sign_in_admin(portal: &Portal) {
    portal
        .identity
        .sign_in(Session::new("admin-1", "The Editor", Role::Admin));
}

fn sign_in_reviewer(portal: &Portal, id: &str) {
    portal
        .identity
        .sign_in(Session::new(id, "Prof. Hamilton", Role::Professor));
}

#[test]
fn full_path_submit_to_archive() {
    let portal = portal();

    sign_in_author(&portal);
    let m1 = portal.manager.submit(journal_draft("M1")).unwrap();
    assert_eq!(m1.status, ManuscriptStatus::Submitted);

    sign_in_admin(&portal);
    let assigned = portal
        .manager
        .assign(m1.id, "reviewer-a", "Prof. Hamilton")
        .unwrap();
    assert_eq!(assigned.status, ManuscriptStatus::UnderReview);
    assert_eq!(assigned.assigned_reviewer_id.as_deref(), Some("reviewer-a"));

    sign_in_reviewer(&portal, "reviewer-a");
    let accepted = portal
        .manager
        .decide(m1.id, ReviewDecision::Accepted, "Well done")
        .unwrap();
    assert_eq!(accepted.status, ManuscriptStatus::Accepted);
    assert_eq!(accepted.revision_comments.as_deref(), Some("Well done"));

    sign_in_admin(&portal);
    let published = portal.manager.publish(m1.id).unwrap();
    assert_eq!(published.status, ManuscriptStatus::Published);
    assert_eq!(portal.manager.published_listing().unwrap().len(), 1);

    let archived = portal.manager.archive(m1.id).unwrap();
    assert_eq!(archived.status, ManuscriptStatus::Archived);
}

#[test]
fn admin_rejects_before_assignment() {
    let portal = portal();

    sign_in_author(&portal);
    let m2 = portal.manager.submit(journal_draft("M2")).unwrap();

    sign_in_admin(&portal);
    let rejected = portal.manager.reject(m2.id, "Out of scope").unwrap();
    assert_eq!(rejected.status, ManuscriptStatus::Rejected);
    // The shortcut bypasses assignment entirely
    assert!(rejected.assigned_reviewer_id.is_none());
    assert_eq!(rejected.revision_comments.as_deref(), Some("Out of scope"));
}

#[test]
fn reassignment_after_revision_is_rejected_by_default() {
    let portal = portal();

    sign_in_author(&portal);
    let m3 = portal.manager.submit(journal_draft("M3")).unwrap();

    sign_in_admin(&portal);
    portal
        .manager
        .assign(m3.id, "reviewer-b", "Prof. Hamilton")
        .unwrap();

    sign_in_reviewer(&portal, "reviewer-b");
    portal
        .manager
        .decide(m3.id, ReviewDecision::RevisionRequired, "Fix citations")
        .unwrap();

    sign_in_admin(&portal);
    let err = portal
        .manager
        .assign(m3.id, "reviewer-c", "Prof. Curie")
        .unwrap_err();
    assert!(matches!(
        err,
        LifecycleError::InvalidTransition {
            from: ManuscriptStatus::RevisionRequired,
            to: ManuscriptStatus::UnderReview,
        }
    ));

    // The fast track is still open: the reviewer re-decides directly
    sign_in_reviewer(&portal, "reviewer-b");
    let accepted = portal
        .manager
        .decide(m3.id, ReviewDecision::Accepted, "Citations fixed")
        .unwrap();
    assert_eq!(accepted.status, ManuscriptStatus::Accepted);
}

#[test]
fn every_operation_emits_a_notification() {
    let portal = portal();

    sign_in_author(&portal);
    let m = portal.manager.submit(journal_draft("M4")).unwrap();
    sign_in_admin(&portal);
    portal.manager.assign(m.id, "reviewer-a", "Prof").unwrap();
    portal
        .manager
        .decide(m.id, ReviewDecision::Accepted, "Fine")
        .unwrap();
    portal.manager.publish(m.id).unwrap();
    portal.manager.publish(m.id).unwrap_err();

    // submit + assign + decide + publish + failed publish
    assert_eq!(portal.notifier.all().len(), 5);
}

#[test]
fn commands_drive_the_same_workflow() {
    let portal = portal();

    sign_in_author(&portal);
    let m = LifecycleCommand::Submit {
        draft: journal_draft("M5"),
    }
    .execute(&portal.manager)
    .unwrap()
    .unwrap();

    sign_in_admin(&portal);
    LifecycleCommand::Assign {
        manuscript_id: m.id,
        reviewer_id: "reviewer-a".to_string(),
        reviewer_name: "Prof. Hamilton".to_string(),
    }
    .execute(&portal.manager)
    .unwrap();

    sign_in_reviewer(&portal, "reviewer-a");
    let decided = LifecycleCommand::Decide {
        manuscript_id: m.id,
        decision: ReviewDecision::Accepted,
        comments: "Well done".to_string(),
    }
    .execute(&portal.manager)
    .unwrap()
    .unwrap();
    assert_eq!(decided.status, ManuscriptStatus::Accepted);

    sign_in_admin(&portal);
    let deleted = LifecycleCommand::Delete { manuscript_id: m.id }
        .execute(&portal.manager)
        .unwrap();
    assert!(deleted.is_none());
}

#[test]
fn stale_writer_loses_with_conflict() {
    let store = Arc::new(MemoryStore::new());
    let identity = Arc::new(StaticIdentity::anonymous());
    let notifier = Arc::new(MemoryNotifier::new());
    let manager = LifecycleManager::new(store.clone(), identity.clone(), notifier);

    identity.sign_in(Session::new("author-1", "Ada", Role::User));
    let m = manager.submit(journal_draft("M6")).unwrap();

    identity.sign_in(Session::new("admin-1", "The Editor", Role::Admin));
    manager.assign(m.id, "reviewer-a", "Prof").unwrap();

    // A second writer still holds the pre-assignment row and replays the
    // update with the stale version
    use folio_store::PortalStore;
    let mut stale = m.clone();
    stale
        .transition_to(ManuscriptStatus::Rejected)
        .unwrap();
    let err = store.update_manuscript(&stale, m.version).unwrap_err();
    assert!(matches!(
        err,
        folio_store::StoreError::VersionConflict { .. }
    ));

    // The assignment won; the stale rejection did not land
    let current = manager.get(m.id).unwrap();
    assert_eq!(current.status, ManuscriptStatus::UnderReview);
}

#[cfg(feature = "sqlite")]
mod sqlite_backed {
    use super::*;
    use folio_store::SqliteStore;

    #[test]
    fn full_path_on_sqlite() {
        let identity = Arc::new(StaticIdentity::anonymous());
        let notifier = Arc::new(MemoryNotifier::new());
        let manager = LifecycleManager::new(
            Arc::new(SqliteStore::open_in_memory().unwrap()),
            identity.clone(),
            notifier,
        );

        identity.sign_in(Session::new("author-1", "Ada", Role::User));
        let m = manager.submit(journal_draft("M7")).unwrap();

        identity.sign_in(Session::new("admin-1", "The Editor", Role::Admin));
        manager.assign(m.id, "reviewer-a", "Prof").unwrap();
        manager
            .decide(m.id, ReviewDecision::Accepted, "Well done")
            .unwrap();
        manager.publish(m.id).unwrap();

        let current = manager.get(m.id).unwrap();
        assert_eq!(current.status, ManuscriptStatus::Published);
        assert_eq!(manager.published_listing().unwrap().len(), 1);
        assert_eq!(manager.reviews_for(m.id).unwrap().len(), 1);
    }
}
