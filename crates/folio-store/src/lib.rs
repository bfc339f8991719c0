//! Folio Store - Persistence seam for the portal
//!
//! The lifecycle manager talks to a [`PortalStore`] and never to a concrete
//! backend. Two implementations ship here:
//! - [`MemoryStore`]: `RwLock`-guarded tables for tests and embedding
//! - `SqliteStore` (feature `sqlite`): durable storage with a versioned schema
//!
//! Manuscript updates are compare-and-swap on the record's version counter, so
//! a stale writer fails with [`StoreError::VersionConflict`] instead of
//! silently overwriting a concurrent change.

pub mod error;
pub mod memory;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::PortalStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
