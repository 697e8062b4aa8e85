//! In-process submission store.
//!
//! Used when `PERSISTENCE_ENABLED=false` and throughout the test suite.
//! Contents are lost when the process exits.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::SubmissionRepository;
use crate::domain::{NewSubmission, Submission, SubmissionId};
use crate::error::PostboxError;

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Submission>,
    last_id: i64,
}

/// Submission store kept in a `Vec` behind a [`tokio::sync::RwLock`].
///
/// Rows are appended in insertion order. `id` starts at 1 and increments
/// by one; `created_at` is clamped so it never goes backwards, which keeps
/// the vector sorted by `(created_at, id)` without a sort on read.
#[derive(Debug, Default)]
pub struct InMemorySubmissionRepository {
    inner: RwLock<Inner>,
}

impl InMemorySubmissionRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored submissions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    /// Returns `true` if nothing has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.rows.is_empty()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn create(&self, new: NewSubmission) -> Result<Submission, PostboxError> {
        let mut inner = self.inner.write().await;

        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| PostboxError::StorageFailure("submission id space exhausted".into()))?;

        let now = Utc::now();
        let created_at = match inner.rows.last() {
            Some(prev) if prev.created_at > now => prev.created_at,
            _ => now,
        };

        let submission = Submission {
            id: SubmissionId::new(id),
            address: new.address,
            created_at,
        };
        inner.last_id = id;
        inner.rows.push(submission.clone());
        Ok(submission)
    }

    async fn list(&self) -> Result<Vec<Submission>, PostboxError> {
        Ok(self.inner.read().await.rows.clone())
    }

    async fn ping(&self) -> Result<(), PostboxError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
