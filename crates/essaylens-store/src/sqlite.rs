//! SQLite-backed submission store.
//!
//! # Responsibility
//! - Own the `essays` schema and keep it current on open.
//! - Serve filtered/paginated/sorted listings and SQL-side aggregates.
//!
//! # Invariants
//! - The embedded assessment is stored as a JSON column and never mutated
//!   after insert.
//! - Timestamps are RFC 3339 UTC with fixed microsecond precision, so
//!   lexicographic ORDER BY matches chronological order.

use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

use essaylens_core::error::{EssayError, EssayResult};
use essaylens_core::features;
use essaylens_core::model::{
    EssaySubmission, EvaluationResult, Level, NewSubmission, Status, SubmissionPatch,
};
use essaylens_core::query::{ListQuery, Page, SortField, SortOrder};
use essaylens_core::statistics::{EssayStats, LevelCount};
use essaylens_core::traits::SubmissionStore;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS essays (
    id          TEXT PRIMARY KEY,
    text        TEXT NOT NULL,
    university  TEXT NOT NULL DEFAULT '',
    level       TEXT NOT NULL,
    word_count  INTEGER NOT NULL,
    char_count  INTEGER NOT NULL,
    status      TEXT NOT NULL,
    assessment  TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_essays_created_at ON essays (created_at);
CREATE INDEX IF NOT EXISTS idx_essays_level ON essays (level);
CREATE INDEX IF NOT EXISTS idx_essays_status ON essays (status);
";

/// Durable store over a single SQLite connection.
///
/// The connection lives behind a mutex; every call is a short, fully
/// synchronous critical section, never held across an await.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) a store at the given path.
    pub fn open(path: &Path) -> EssayResult<Self> {
        let conn = Connection::open(path).map_err(persistence)?;
        Self::from_connection(conn)
    }

    /// Ephemeral store, useful in tests.
    pub fn open_in_memory() -> EssayResult<Self> {
        let conn = Connection::open_in_memory().map_err(persistence)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> EssayResult<Self> {
        conn.execute_batch(SCHEMA).map_err(persistence)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> EssayResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| EssayError::Persistence("sqlite connection mutex poisoned".into()))
    }
}

fn persistence(err: rusqlite::Error) -> EssayError {
    EssayError::Persistence(err.to_string())
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> EssayResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| {
            EssayError::Persistence(format!("invalid timestamp value `{value}` in essays"))
        })
}

fn row_to_submission(row: &Row<'_>) -> EssayResult<EssaySubmission> {
    let id_text: String = row.get("id").map_err(persistence)?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| EssayError::Persistence(format!("invalid uuid value `{id_text}` in essays.id")))?;

    let level_text: String = row.get("level").map_err(persistence)?;
    let level = Level::from_str(&level_text).map_err(EssayError::Persistence)?;

    let status_text: String = row.get("status").map_err(persistence)?;
    let status = Status::from_str(&status_text).map_err(EssayError::Persistence)?;

    let assessment_json: Option<String> = row.get("assessment").map_err(persistence)?;
    let assessment: Option<EvaluationResult> = match assessment_json {
        Some(json) => Some(
            serde_json::from_str(&json)
                .map_err(|e| EssayError::Persistence(format!("corrupt assessment JSON: {e}")))?,
        ),
        None => None,
    };

    let created_at: String = row.get("created_at").map_err(persistence)?;
    let updated_at: String = row.get("updated_at").map_err(persistence)?;

    let word_count: i64 = row.get("word_count").map_err(persistence)?;
    let char_count: i64 = row.get("char_count").map_err(persistence)?;

    Ok(EssaySubmission {
        id,
        text: row.get("text").map_err(persistence)?,
        university: row.get("university").map_err(persistence)?,
        level,
        word_count: word_count as usize,
        char_count: char_count as usize,
        assessment,
        status,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// ORDER BY expression per sort field. A closed mapping, so user input can
/// never reach the SQL text.
fn sort_expression(field: SortField) -> &'static str {
    match field {
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
        SortField::WordCount => "word_count",
        SortField::OverallScore => "json_extract(assessment, '$.overall_score')",
    }
}

#[async_trait]
impl SubmissionStore for SqliteStore {
    async fn insert(&self, submission: NewSubmission) -> EssayResult<EssaySubmission> {
        // Truncated to the stored precision, so the returned record equals
        // a later read of the same row.
        let now = Utc::now().trunc_subsecs(6);
        let stored = EssaySubmission {
            id: Uuid::new_v4(),
            text: submission.text,
            university: submission.university,
            level: submission.level,
            word_count: submission.word_count,
            char_count: submission.char_count,
            assessment: submission.assessment,
            status: submission.status,
            created_at: now,
            updated_at: now,
        };

        let assessment_json = match &stored.assessment {
            Some(assessment) => Some(
                serde_json::to_string(assessment)
                    .map_err(|e| EssayError::Internal(format!("assessment serialization: {e}")))?,
            ),
            None => None,
        };

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO essays
                (id, text, university, level, word_count, char_count, status,
                 assessment, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                stored.id.to_string(),
                stored.text,
                stored.university,
                stored.level.to_string(),
                stored.word_count as i64,
                stored.char_count as i64,
                stored.status.to_string(),
                assessment_json,
                format_timestamp(stored.created_at),
                format_timestamp(stored.updated_at),
            ],
        )
        .map_err(persistence)?;

        tracing::debug!(id = %stored.id, "submission persisted");
        Ok(stored)
    }

    async fn get(&self, id: Uuid) -> EssayResult<EssaySubmission> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT * FROM essays WHERE id = ?1;")
            .map_err(persistence)?;
        let mut rows = stmt.query([id.to_string()]).map_err(persistence)?;
        match rows.next().map_err(persistence)? {
            Some(row) => row_to_submission(row),
            None => Err(EssayError::NotFound(id)),
        }
    }

    async fn list(&self, query: &ListQuery) -> EssayResult<Page<EssaySubmission>> {
        let mut filter = String::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = query.status {
            filter.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.to_string()));
        }
        if let Some(level) = query.level {
            filter.push_str(" AND level = ?");
            bind_values.push(Value::Text(level.to_string()));
        }

        let conn = self.lock()?;

        let count_sql = format!("SELECT COUNT(*) FROM essays WHERE 1=1{filter};");
        let total: i64 = conn
            .query_row(&count_sql, params_from_iter(bind_values.clone()), |row| {
                row.get(0)
            })
            .map_err(persistence)?;

        let order = match query.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        let select_sql = format!(
            "SELECT * FROM essays WHERE 1=1{filter}
             ORDER BY {sort} {order}, id ASC
             LIMIT ? OFFSET ?;",
            sort = sort_expression(query.sort_by),
        );
        bind_values.push(Value::Integer(i64::from(query.limit())));
        bind_values.push(Value::Integer(query.offset() as i64));

        let mut stmt = conn.prepare(&select_sql).map_err(persistence)?;
        let mut rows = stmt
            .query(params_from_iter(bind_values))
            .map_err(persistence)?;
        let mut data = Vec::new();
        while let Some(row) = rows.next().map_err(persistence)? {
            data.push(row_to_submission(row)?);
        }

        Ok(Page::new(data, query.page(), query.limit(), total as u64))
    }

    async fn update(&self, id: Uuid, patch: SubmissionPatch) -> EssayResult<EssaySubmission> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare("SELECT * FROM essays WHERE id = ?1;")
            .map_err(persistence)?;
        let mut rows = stmt.query([id.to_string()]).map_err(persistence)?;
        let mut current = match rows.next().map_err(persistence)? {
            Some(row) => row_to_submission(row)?,
            None => return Err(EssayError::NotFound(id)),
        };
        drop(rows);
        drop(stmt);

        if let Some(text) = patch.text {
            let (word_count, char_count) = features::basic_counts(&text);
            current.text = text;
            current.word_count = word_count;
            current.char_count = char_count;
        }
        if let Some(university) = patch.university {
            current.university = university;
        }
        if let Some(level) = patch.level {
            current.level = level;
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        current.updated_at = Utc::now().trunc_subsecs(6);

        // The assessment column is deliberately not part of the UPDATE.
        conn.execute(
            "UPDATE essays
             SET text = ?2, university = ?3, level = ?4, word_count = ?5,
                 char_count = ?6, status = ?7, updated_at = ?8
             WHERE id = ?1;",
            params![
                id.to_string(),
                current.text,
                current.university,
                current.level.to_string(),
                current.word_count as i64,
                current.char_count as i64,
                current.status.to_string(),
                format_timestamp(current.updated_at),
            ],
        )
        .map_err(persistence)?;

        Ok(current)
    }

    async fn delete(&self, id: Uuid) -> EssayResult<()> {
        let conn = self.lock()?;
        let changed = conn
            .execute("DELETE FROM essays WHERE id = ?1;", [id.to_string()])
            .map_err(persistence)?;
        if changed == 0 {
            return Err(EssayError::NotFound(id));
        }
        Ok(())
    }

    async fn stats(&self) -> EssayResult<EssayStats> {
        let conn = self.lock()?;

        let total_essays: i64 = conn
            .query_row("SELECT COUNT(*) FROM essays;", [], |row| row.get(0))
            .map_err(persistence)?;

        let average_score: Option<f64> = conn
            .query_row(
                "SELECT AVG(json_extract(assessment, '$.overall_score'))
                 FROM essays WHERE assessment IS NOT NULL;",
                [],
                |row| row.get(0),
            )
            .map_err(persistence)?;

        let mut stmt = conn
            .prepare("SELECT level, COUNT(*) FROM essays GROUP BY level ORDER BY level ASC;")
            .map_err(persistence)?;
        let mut rows = stmt.query([]).map_err(persistence)?;
        let mut by_level = Vec::new();
        while let Some(row) = rows.next().map_err(persistence)? {
            let level_text: String = row.get(0).map_err(persistence)?;
            let count: i64 = row.get(1).map_err(persistence)?;
            by_level.push(LevelCount {
                level: Level::from_str(&level_text).map_err(EssayError::Persistence)?,
                count: count as u64,
            });
        }

        Ok(EssayStats {
            total_essays: total_essays as u64,
            average_score: average_score.unwrap_or(0.0),
            by_level,
        })
    }

    async fn ping(&self) -> EssayResult<()> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1;", [], |row| row.get::<_, i64>(0))
            .map_err(persistence)?;
        Ok(())
    }
}
