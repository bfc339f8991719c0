//! Folio Lifecycle - Manuscript workflow core for the publishing portal
//!
//! This crate provides the manuscript lifecycle manager:
//!
//! - **LifecycleManager**: One service object with injected store, identity,
//!   and notifier collaborators; every workflow operation goes through it
//! - **LifecycleCommand**: Serializable commands mapping UI actions to
//!   operations (Submit, Assign, Decide, Reject, Publish, Archive, Delete)
//! - **IdentityProvider / Session**: Caller identity and role seam
//! - **Notifier / Notification**: Advisory toast messages, one per operation
//! - **PortalConfig**: Workflow flags for the ambiguous review-cycle edges
//! - **LifecycleError**: Validation / InvalidTransition / PermissionDenied /
//!   NotFound / Conflict / Persistence taxonomy
//!
//! # Workflow
//!
//! ```text
//! Submitted → UnderReview → Accepted → Published → Archived
//!     ↓            ↓  ↑  ↖
//!  Rejected    Rejected   RevisionRequired
//! ```
//!
//! Writes are single-row compare-and-swap updates on the manuscript's version
//! counter; a concurrent modification fails with `LifecycleError::Conflict`
//! rather than silently overwriting.

pub mod command;
pub mod config;
pub mod error;
pub mod identity;
pub mod manager;
pub mod notify;

pub use command::LifecycleCommand;
pub use config::{ConfigError, PortalConfig, WorkflowConfig};
pub use error::{LifecycleError, Result};
pub use identity::{IdentityProvider, Session, StaticIdentity};
pub use manager::LifecycleManager;
pub use notify::{MemoryNotifier, Notification, Notifier, Severity, TracingNotifier};
