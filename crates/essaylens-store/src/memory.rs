//! In-memory submission store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use essaylens_core::error::{EssayError, EssayResult};
use essaylens_core::features;
use essaylens_core::model::{EssaySubmission, NewSubmission, SubmissionPatch};
use essaylens_core::query::{ListQuery, Page, SortField, SortOrder};
use essaylens_core::statistics::{compute_stats, EssayStats};
use essaylens_core::traits::SubmissionStore;

/// HashMap-backed store. Cheap clone-on-read semantics; the mutex is never
/// held across an await point.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<Uuid, EssaySubmission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> EssayResult<std::sync::MutexGuard<'_, HashMap<Uuid, EssaySubmission>>> {
        self.rows
            .lock()
            .map_err(|_| EssayError::Persistence("memory store mutex poisoned".into()))
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, submission: NewSubmission) -> EssayResult<EssaySubmission> {
        let now = Utc::now();
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
        self.lock()?.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: Uuid) -> EssayResult<EssaySubmission> {
        self.lock()?.get(&id).cloned().ok_or(EssayError::NotFound(id))
    }

    async fn list(&self, query: &ListQuery) -> EssayResult<Page<EssaySubmission>> {
        let mut rows: Vec<EssaySubmission> = self
            .lock()?
            .values()
            .filter(|row| query.status.is_none_or(|status| row.status == status))
            .filter(|row| query.level.is_none_or(|level| row.level == level))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match query.sort_by {
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                SortField::WordCount => a.word_count.cmp(&b.word_count),
                SortField::OverallScore => {
                    let score = |row: &EssaySubmission| {
                        row.assessment.as_ref().map(|a| a.overall_score)
                    };
                    score(a)
                        .partial_cmp(&score(b))
                        .unwrap_or(std::cmp::Ordering::Equal)
                }
            };
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = rows.len() as u64;
        let data: Vec<EssaySubmission> = rows
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit() as usize)
            .collect();

        Ok(Page::new(data, query.page(), query.limit(), total))
    }

    async fn update(&self, id: Uuid, patch: SubmissionPatch) -> EssayResult<EssaySubmission> {
        let mut rows = self.lock()?;
        let row = rows.get_mut(&id).ok_or(EssayError::NotFound(id))?;

        if let Some(text) = patch.text {
            let (word_count, char_count) = features::basic_counts(&text);
            row.text = text;
            row.word_count = word_count;
            row.char_count = char_count;
        }
        if let Some(university) = patch.university {
            row.university = university;
        }
        if let Some(level) = patch.level {
            row.level = level;
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        row.updated_at = Utc::now();

        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> EssayResult<()> {
        self.lock()?
            .remove(&id)
            .map(|_| ())
            .ok_or(EssayError::NotFound(id))
    }

    async fn stats(&self) -> EssayResult<EssayStats> {
        let rows: Vec<EssaySubmission> = self.lock()?.values().cloned().collect();
        Ok(compute_stats(&rows))
    }

    async fn ping(&self) -> EssayResult<()> {
        self.lock().map(|_| ())
    }
}
