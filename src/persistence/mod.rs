//! Persistence layer: durable storage of submissions.
//!
//! Provides the [`SubmissionRepository`] trait and two implementations:
//! [`PostgresSubmissionRepository`] backed by `sqlx::PgPool`, and
//! [`InMemorySubmissionRepository`] for running without a database.
//!
//! The repository does not validate its input; callers hand it an
//! already-validated [`NewSubmission`]. Single-row inserts are atomic in
//! both backends, so a failed create never leaves a partial row behind.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

pub use memory::InMemorySubmissionRepository;
pub use postgres::PostgresSubmissionRepository;

use crate::domain::{NewSubmission, Submission};
use crate::error::PostboxError;

/// Storage and retrieval of [`Submission`] records.
///
/// No update or delete exists: submissions are immutable once created.
#[async_trait]
pub trait SubmissionRepository: Send + Sync + std::fmt::Debug {
    /// Persists a new submission and returns it with its store-assigned
    /// `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`PostboxError::StorageFailure`] if the store is unreachable
    /// or rejects the write.
    async fn create(&self, new: NewSubmission) -> Result<Submission, PostboxError>;

    /// Returns every stored submission ordered by ascending `created_at`,
    /// ties broken by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PostboxError::StorageFailure`] if the store is unreachable.
    async fn list(&self) -> Result<Vec<Submission>, PostboxError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`PostboxError::Unavailable`] if it is not.
    async fn ping(&self) -> Result<(), PostboxError>;

    /// Short name of the backend, reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
