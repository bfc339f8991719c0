//! SQLite-backed implementation of the PortalStore trait

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use folio_domain::{
    Manuscript, ManuscriptId, ManuscriptStatus, PaperType, PublishedWork, Review, ReviewDecision,
    UserProfile,
};

use crate::error::StoreError;
use crate::schema::{Schema, SCHEMA_VERSION};
use crate::store::PortalStore;

const MANUSCRIPT_COLUMNS: &str = "id, author_id, author_name, author_email, title, abstract_text, \
     discipline, paper_type, manuscript_type, keywords, co_authors, attachments, status, \
     assigned_reviewer_id, assigned_reviewer_name, revision_comments, submission_date, \
     updated_at, version";

/// SQLite store for the portal tables
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

/// Raw manuscript row, decoded into a domain value after the query
struct ManuscriptRow {
    id: String,
    author_id: String,
    author_name: String,
    author_email: Option<String>,
    title: String,
    abstract_text: String,
    discipline: String,
    paper_type: String,
    manuscript_type: Option<String>,
    keywords: String,
    co_authors: String,
    attachments: String,
    status: String,
    assigned_reviewer_id: Option<String>,
    assigned_reviewer_name: Option<String>,
    revision_comments: Option<String>,
    submission_date: String,
    updated_at: String,
    version: u64,
}

impl SqliteStore {
    /// Open (or create) a database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Storage(format!("open: {}", e)))?;
        Self::init_with_connection(conn)
    }

    /// Create an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Storage(format!("open_in_memory: {}", e)))?;
        Self::init_with_connection(conn)
    }

    fn init_with_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Initialize the database schema, running migrations as needed
    fn initialize(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let current_version: u32 = conn
            .query_row(
                "SELECT version FROM schema_version ORDER BY applied_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        if current_version == 0 {
            conn.execute_batch(Schema::create_tables())?;
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [SCHEMA_VERSION],
            )?;
        } else if current_version < SCHEMA_VERSION {
            for version in current_version..SCHEMA_VERSION {
                if let Some(migration) = Schema::migration(version, version + 1) {
                    conn.execute_batch(migration)?;
                }
            }
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [SCHEMA_VERSION],
            )?;
        }

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    fn read_raw_row(row: &rusqlite::Row) -> rusqlite::Result<ManuscriptRow> {
        Ok(ManuscriptRow {
            id: row.get(0)?,
            author_id: row.get(1)?,
            author_name: row.get(2)?,
            author_email: row.get(3)?,
            title: row.get(4)?,
            abstract_text: row.get(5)?,
            discipline: row.get(6)?,
            paper_type: row.get(7)?,
            manuscript_type: row.get(8)?,
            keywords: row.get(9)?,
            co_authors: row.get(10)?,
            attachments: row.get(11)?,
            status: row.get(12)?,
            assigned_reviewer_id: row.get(13)?,
            assigned_reviewer_name: row.get(14)?,
            revision_comments: row.get(15)?,
            submission_date: row.get(16)?,
            updated_at: row.get(17)?,
            version: row.get(18)?,
        })
    }

    fn decode_manuscript(raw: ManuscriptRow) -> Result<Manuscript, StoreError> {
        let id = ManuscriptId::parse(&raw.id)
            .ok_or_else(|| StoreError::Serialization(format!("bad manuscript id: {}", raw.id)))?;
        let status = ManuscriptStatus::parse(&raw.status)
            .ok_or_else(|| StoreError::Serialization(format!("bad status: {}", raw.status)))?;
        let paper_type = PaperType::parse(&raw.paper_type).ok_or_else(|| {
            StoreError::Serialization(format!("bad paper type: {}", raw.paper_type))
        })?;

        Ok(Manuscript {
            id,
            author_id: raw.author_id,
            author_name: raw.author_name,
            author_email: raw.author_email,
            title: raw.title,
            abstract_text: raw.abstract_text,
            discipline: raw.discipline,
            paper_type,
            manuscript_type: raw.manuscript_type,
            keywords: serde_json::from_str(&raw.keywords)?,
            co_authors: serde_json::from_str(&raw.co_authors)?,
            attachments: serde_json::from_str(&raw.attachments)?,
            status,
            assigned_reviewer_id: raw.assigned_reviewer_id,
            assigned_reviewer_name: raw.assigned_reviewer_name,
            revision_comments: raw.revision_comments,
            submission_date: parse_timestamp(&raw.submission_date)?,
            updated_at: parse_timestamp(&raw.updated_at)?,
            version: raw.version,
        })
    }

    fn query_manuscripts(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Manuscript>, StoreError> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, Self::read_raw_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(Self::decode_manuscript).collect()
    }

    fn write_manuscript(conn: &Connection, m: &Manuscript, sql: &str) -> Result<usize, StoreError> {
        let keywords = serde_json::to_string(&m.keywords)?;
        let co_authors = serde_json::to_string(&m.co_authors)?;
        let attachments = serde_json::to_string(&m.attachments)?;
        let changed = conn.execute(
            sql,
            params![
                m.id.to_string(),
                m.author_id,
                m.author_name,
                m.author_email,
                m.title,
                m.abstract_text,
                m.discipline,
                m.paper_type.to_string(),
                m.manuscript_type,
                keywords,
                co_authors,
                attachments,
                m.status.to_string(),
                m.assigned_reviewer_id,
                m.assigned_reviewer_name,
                m.revision_comments,
                m.submission_date.to_rfc3339(),
                m.updated_at.to_rfc3339(),
                m.version,
            ],
        )?;
        Ok(changed)
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Serialization(format!("bad timestamp {}: {}", s, e)))
}

impl PortalStore for SqliteStore {
    fn insert_manuscript(&self, manuscript: &Manuscript) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let exists: bool = conn.query_row(
            "SELECT COUNT(*) FROM manuscripts WHERE id = ?1",
            [manuscript.id.to_string()],
            |row| row.get::<_, i64>(0).map(|n| n > 0),
        )?;
        if exists {
            return Err(StoreError::AlreadyExists(manuscript.id));
        }
        Self::write_manuscript(
            &conn,
            manuscript,
            "INSERT INTO manuscripts (id, author_id, author_name, author_email, title, \
             abstract_text, discipline, paper_type, manuscript_type, keywords, co_authors, \
             attachments, status, assigned_reviewer_id, assigned_reviewer_name, \
             revision_comments, submission_date, updated_at, version) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
        )?;
        Ok(())
    }

    fn get_manuscript(&self, id: ManuscriptId) -> Result<Option<Manuscript>, StoreError> {
        let conn = self.lock()?;
        let raw = conn
            .query_row(
                &format!("SELECT {} FROM manuscripts WHERE id = ?1", MANUSCRIPT_COLUMNS),
                [id.to_string()],
                Self::read_raw_row,
            )
            .optional()?;
        raw.map(Self::decode_manuscript).transpose()
    }

    fn list_manuscripts(&self) -> Result<Vec<Manuscript>, StoreError> {
        let conn = self.lock()?;
        Self::query_manuscripts(
            &conn,
            &format!(
                "SELECT {} FROM manuscripts ORDER BY submission_date DESC",
                MANUSCRIPT_COLUMNS
            ),
            [],
        )
    }

    fn manuscripts_by_status(
        &self,
        status: ManuscriptStatus,
    ) -> Result<Vec<Manuscript>, StoreError> {
        let conn = self.lock()?;
        Self::query_manuscripts(
            &conn,
            &format!(
                "SELECT {} FROM manuscripts WHERE status = ?1 ORDER BY submission_date DESC",
                MANUSCRIPT_COLUMNS
            ),
            [status.to_string()],
        )
    }

    fn manuscripts_by_author(&self, author_id: &str) -> Result<Vec<Manuscript>, StoreError> {
        let conn = self.lock()?;
        Self::query_manuscripts(
            &conn,
            &format!(
                "SELECT {} FROM manuscripts WHERE author_id = ?1 ORDER BY submission_date DESC",
                MANUSCRIPT_COLUMNS
            ),
            [author_id],
        )
    }

    fn manuscripts_by_reviewer(&self, reviewer_id: &str) -> Result<Vec<Manuscript>, StoreError> {
        let conn = self.lock()?;
        Self::query_manuscripts(
            &conn,
            &format!(
                "SELECT {} FROM manuscripts WHERE assigned_reviewer_id = ?1 \
                 ORDER BY submission_date DESC",
                MANUSCRIPT_COLUMNS
            ),
            [reviewer_id],
        )
    }

    fn update_manuscript(
        &self,
        manuscript: &Manuscript,
        expected_version: u64,
    ) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let keywords = serde_json::to_string(&manuscript.keywords)?;
        let co_authors = serde_json::to_string(&manuscript.co_authors)?;
        let attachments = serde_json::to_string(&manuscript.attachments)?;

        // Single-row compare-and-swap on the version counter
        let changed = conn.execute(
            "UPDATE manuscripts SET author_id = ?2, author_name = ?3, author_email = ?4, \
             title = ?5, abstract_text = ?6, discipline = ?7, paper_type = ?8, \
             manuscript_type = ?9, keywords = ?10, co_authors = ?11, attachments = ?12, \
             status = ?13, assigned_reviewer_id = ?14, assigned_reviewer_name = ?15, \
             revision_comments = ?16, submission_date = ?17, updated_at = ?18, version = ?19 \
             WHERE id = ?1 AND version = ?20",
            params![
                manuscript.id.to_string(),
                manuscript.author_id,
                manuscript.author_name,
                manuscript.author_email,
                manuscript.title,
                manuscript.abstract_text,
                manuscript.discipline,
                manuscript.paper_type.to_string(),
                manuscript.manuscript_type,
                keywords,
                co_authors,
                attachments,
                manuscript.status.to_string(),
                manuscript.assigned_reviewer_id,
                manuscript.assigned_reviewer_name,
                manuscript.revision_comments,
                manuscript.submission_date.to_rfc3339(),
                manuscript.updated_at.to_rfc3339(),
                manuscript.version,
                expected_version,
            ],
        )?;

        if changed == 0 {
            let actual: Option<u64> = conn
                .query_row(
                    "SELECT version FROM manuscripts WHERE id = ?1",
                    [manuscript.id.to_string()],
                    |row| row.get(0),
                )
                .optional()?;
            return match actual {
                Some(actual) => Err(StoreError::VersionConflict {
                    id: manuscript.id,
                    expected: expected_version,
                    actual,
                }),
                None => Err(StoreError::NotFound(manuscript.id)),
            };
        }

        Ok(())
    }

    fn delete_manuscript(&self, id: ManuscriptId) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "DELETE FROM manuscripts WHERE id = ?1",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn insert_review(&self, review: &Review) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO reviews (id, manuscript_id, reviewer_id, reviewer_name, decision, \
             comments, decided_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                review.id.to_string(),
                review.manuscript_id.to_string(),
                review.reviewer_id,
                review.reviewer_name,
                review.decision.to_string(),
                review.comments,
                review.decided_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn reviews_for_manuscript(&self, id: ManuscriptId) -> Result<Vec<Review>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, manuscript_id, reviewer_id, reviewer_name, decision, comments, decided_at \
             FROM reviews WHERE manuscript_id = ?1 ORDER BY decided_at ASC",
        )?;
        let raw = stmt
            .query_map([id.to_string()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        raw.into_iter()
            .map(
                |(id_str, manuscript_id, reviewer_id, reviewer_name, decision, comments, decided_at)| {
                    let decision = match decision.as_str() {
                        "ACCEPTED" => ReviewDecision::Accepted,
                        "REVISION_REQUIRED" => ReviewDecision::RevisionRequired,
                        "REJECTED" => ReviewDecision::Rejected,
                        other => {
                            return Err(StoreError::Serialization(format!(
                                "bad decision: {}",
                                other
                            )))
                        }
                    };
                    Ok(Review {
                        id: Uuid::parse_str(&id_str)
                            .map_err(|e| StoreError::Serialization(e.to_string()))?,
                        manuscript_id: ManuscriptId::parse(&manuscript_id).ok_or_else(|| {
                            StoreError::Serialization(format!("bad manuscript id: {}", manuscript_id))
                        })?,
                        reviewer_id,
                        reviewer_name,
                        decision,
                        comments,
                        decided_at: parse_timestamp(&decided_at)?,
                    })
                },
            )
            .collect()
    }

    fn insert_published_work(&self, work: &PublishedWork) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO published_works (id, manuscript_id, title, abstract_text, discipline, \
             paper_type, author_name, co_authors, attachments, published_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                work.id.to_string(),
                work.manuscript_id.to_string(),
                work.title,
                work.abstract_text,
                work.discipline,
                work.paper_type.to_string(),
                work.author_name,
                serde_json::to_string(&work.co_authors)?,
                serde_json::to_string(&work.attachments)?,
                work.published_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn list_published_works(&self) -> Result<Vec<PublishedWork>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, manuscript_id, title, abstract_text, discipline, paper_type, \
             author_name, co_authors, attachments, published_at \
             FROM published_works ORDER BY published_at DESC",
        )?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                    row.get::<_, String>(8)?,
                    row.get::<_, String>(9)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        raw.into_iter()
            .map(
                |(
                    id_str,
                    manuscript_id,
                    title,
                    abstract_text,
                    discipline,
                    paper_type,
                    author_name,
                    co_authors,
                    attachments,
                    published_at,
                )| {
                    Ok(PublishedWork {
                        id: Uuid::parse_str(&id_str)
                            .map_err(|e| StoreError::Serialization(e.to_string()))?,
                        manuscript_id: ManuscriptId::parse(&manuscript_id).ok_or_else(|| {
                            StoreError::Serialization(format!("bad manuscript id: {}", manuscript_id))
                        })?,
                        title,
                        abstract_text,
                        discipline,
                        paper_type: PaperType::parse(&paper_type).ok_or_else(|| {
                            StoreError::Serialization(format!("bad paper type: {}", paper_type))
                        })?,
                        author_name,
                        co_authors: serde_json::from_str(&co_authors)?,
                        attachments: serde_json::from_str(&attachments)?,
                        published_at: parse_timestamp(&published_at)?,
                    })
                },
            )
            .collect()
    }

    fn upsert_user(&self, user: &UserProfile) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO users (id, name, email, role) VALUES (?1, ?2, ?3, ?4)",
            params![user.id, user.name, user.email, user.role.to_string()],
        )?;
        Ok(())
    }

    fn get_user(&self, id: &str) -> Result<Option<UserProfile>, StoreError> {
        let conn = self.lock()?;
        let raw = conn
            .query_row(
                "SELECT id, name, email, role FROM users WHERE id = ?1",
                [id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        raw.map(|(id, name, email, role)| {
            Ok(UserProfile {
                id,
                name,
                email,
                role: role
                    .parse()
                    .map_err(|e: String| StoreError::Serialization(e))?,
            })
        })
        .transpose()
    }
}
