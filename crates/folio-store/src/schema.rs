//! SQLite schema for portal storage

/// Schema version for migrations
pub const SCHEMA_VERSION: u32 = 1;

/// SQLite schema definition
pub struct Schema;

impl Schema {
    /// Get the complete schema SQL
    pub fn create_tables() -> &'static str {
        r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Manuscripts table (workflow state)
CREATE TABLE IF NOT EXISTS manuscripts (
    id TEXT PRIMARY KEY,
    author_id TEXT NOT NULL,
    author_name TEXT NOT NULL,
    author_email TEXT,
    title TEXT NOT NULL,
    abstract_text TEXT NOT NULL,
    discipline TEXT NOT NULL,
    paper_type TEXT NOT NULL,
    manuscript_type TEXT,
    keywords TEXT NOT NULL,
    co_authors TEXT NOT NULL,
    attachments TEXT NOT NULL,
    status TEXT NOT NULL,
    assigned_reviewer_id TEXT,
    assigned_reviewer_name TEXT,
    revision_comments TEXT,
    submission_date TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_manuscripts_status ON manuscripts(status);
CREATE INDEX IF NOT EXISTS idx_manuscripts_author ON manuscripts(author_id);
CREATE INDEX IF NOT EXISTS idx_manuscripts_reviewer ON manuscripts(assigned_reviewer_id);
CREATE INDEX IF NOT EXISTS idx_manuscripts_submitted ON manuscripts(submission_date DESC);

-- Reviews table (decision history)
CREATE TABLE IF NOT EXISTS reviews (
    id TEXT PRIMARY KEY,
    manuscript_id TEXT NOT NULL,
    reviewer_id TEXT NOT NULL,
    reviewer_name TEXT NOT NULL,
    decision TEXT NOT NULL,
    comments TEXT NOT NULL,
    decided_at TEXT NOT NULL,
    FOREIGN KEY (manuscript_id) REFERENCES manuscripts(id)
);

CREATE INDEX IF NOT EXISTS idx_reviews_manuscript ON reviews(manuscript_id);
CREATE INDEX IF NOT EXISTS idx_reviews_reviewer ON reviews(reviewer_id);

-- Published works table (public listing)
CREATE TABLE IF NOT EXISTS published_works (
    id TEXT PRIMARY KEY,
    manuscript_id TEXT NOT NULL,
    title TEXT NOT NULL,
    abstract_text TEXT NOT NULL,
    discipline TEXT NOT NULL,
    paper_type TEXT NOT NULL,
    author_name TEXT NOT NULL,
    co_authors TEXT NOT NULL,
    attachments TEXT NOT NULL,
    published_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_published_date ON published_works(published_at DESC);
CREATE INDEX IF NOT EXISTS idx_published_discipline ON published_works(discipline);

-- Users table (accounts and roles)
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT,
    role TEXT NOT NULL
);
"#
    }

    /// Get migration SQL for a specific version
    pub fn migration(from_version: u32, to_version: u32) -> Option<&'static str> {
        match (from_version, to_version) {
            // Add migrations here as the schema evolves
            _ => None,
        }
    }
}
