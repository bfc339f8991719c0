//! Folio Domain - Types for the academic publishing portal
//!
//! This crate provides the canonical domain models for the folio review
//! pipeline:
//! - **Manuscript**: A submitted journal article or book proposal with its
//!   review workflow state (Submitted→UnderReview→…→Published→Archived)
//! - **ManuscriptStatus**: The seven-state review state machine
//! - **ReviewDecision**: The outcomes a reviewer may record
//! - **Role**: Caller roles (Admin, Professor, User)
//! - **Review / PublishedWork / UserProfile**: Flat records surrounding the
//!   workflow (decision history, publication listing, accounts)
//! - **Validation**: Submission field validation

pub mod decision;
pub mod manuscript;
pub mod records;
pub mod role;
pub mod status;
pub mod validation;

pub use decision::*;
pub use manuscript::*;
pub use records::*;
pub use role::*;
pub use status::*;
pub use validation::*;
