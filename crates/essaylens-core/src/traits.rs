//! Store contract the engine persists through.
//!
//! Implemented by the `essaylens-store` crate. The engine treats the store
//! as its only I/O collaborator: it hands over a fully-assembled submission
//! and gets back the persisted record with store-assigned id and timestamps.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EssayResult;
use crate::model::{EssaySubmission, NewSubmission, SubmissionPatch};
use crate::query::{ListQuery, Page};
use crate::statistics::EssayStats;

/// Persistence and query service for essay submissions.
///
/// Contract notes:
/// - `insert` assigns the id and both timestamps.
/// - `update` applies a partial patch; a text change recomputes the derived
///   word/char counts, bumps `updated_at`, and leaves any existing
///   assessment untouched.
/// - Reads after a successful write observe that write.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a new submission, returning the stored record.
    async fn insert(&self, submission: NewSubmission) -> EssayResult<EssaySubmission>;

    /// Fetch one submission by id.
    async fn get(&self, id: Uuid) -> EssayResult<EssaySubmission>;

    /// Filtered, sorted, paginated listing.
    async fn list(&self, query: &ListQuery) -> EssayResult<Page<EssaySubmission>>;

    /// Apply a partial update and return the new state.
    async fn update(&self, id: Uuid, patch: SubmissionPatch) -> EssayResult<EssaySubmission>;

    /// Delete a submission. `NotFound` when the id is unknown.
    async fn delete(&self, id: Uuid) -> EssayResult<()>;

    /// Aggregate statistics over the whole corpus.
    async fn stats(&self) -> EssayResult<EssayStats>;

    /// Connectivity probe. `Ok(())` means the store can serve requests.
    async fn ping(&self) -> EssayResult<()>;
}
