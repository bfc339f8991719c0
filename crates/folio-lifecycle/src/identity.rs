//! Caller identity seam
//!
//! The portal delegates authentication to an external provider; the lifecycle
//! manager only needs the caller's identity and role, injected through
//! [`IdentityProvider`] rather than read from any ambient session state.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use folio_domain::Role;

/// The authenticated caller of a lifecycle operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            role,
        }
    }
}

/// Supplies the current caller's identity and role
pub trait IdentityProvider: Send + Sync {
    /// The current session, or None when unauthenticated
    fn current_user(&self) -> Option<Session>;
}

/// Identity provider holding an explicit session, for tests and embedding.
///
/// Interior mutability lets a test sign different users in against one
/// manager instance.
#[derive(Default)]
pub struct StaticIdentity {
    session: RwLock<Option<Session>>,
}

impl StaticIdentity {
    /// Start unauthenticated
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Start signed in as the given session
    pub fn signed_in(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }

    /// Replace the current session
    pub fn sign_in(&self, session: Session) {
        if let Ok(mut guard) = self.session.write() {
            *guard = Some(session);
        }
    }

    /// Clear the current session
    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.session.write() {
            *guard = None;
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<Session> {
        self.session.read().ok().and_then(|guard| guard.clone())
    }
}
