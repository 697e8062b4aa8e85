//! Submission service: delegates to the repository and logs outcomes.

use std::sync::Arc;

use crate::domain::{NewSubmission, Submission};
use crate::error::PostboxError;
use crate::persistence::SubmissionRepository;

/// Orchestration layer for submission operations.
///
/// Owns an injected [`SubmissionRepository`] handle. Input arrives already
/// validated as a [`NewSubmission`]; failures are logged and propagated
/// unchanged, never retried.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    repository: Arc<dyn SubmissionRepository>,
}

impl SubmissionService {
    /// Creates a new `SubmissionService` over the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn SubmissionRepository>) -> Self {
        Self { repository }
    }

    /// Returns the underlying repository.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn SubmissionRepository> {
        &self.repository
    }

    /// Stores a new submission.
    ///
    /// # Errors
    ///
    /// Returns [`PostboxError::StorageFailure`] if the repository rejects
    /// the write.
    pub async fn create(&self, new: NewSubmission) -> Result<Submission, PostboxError> {
        match self.repository.create(new).await {
            Ok(submission) => {
                tracing::info!(id = %submission.id, "submission created");
                Ok(submission)
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to store submission");
                Err(err)
            }
        }
    }

    /// Lists all submissions ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`PostboxError::StorageFailure`] if the repository is
    /// unreachable.
    pub async fn list(&self) -> Result<Vec<Submission>, PostboxError> {
        let submissions = self.repository.list().await.inspect_err(|err| {
            tracing::error!(error = %err, "failed to list submissions");
        })?;
        tracing::debug!(count = submissions.len(), "listed submissions");
        Ok(submissions)
    }

    /// Probes the repository for the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`PostboxError::Unavailable`] if the store does not answer.
    pub async fn check_storage(&self) -> Result<(), PostboxError> {
        self.repository.ping().await.inspect_err(|err| {
            tracing::warn!(backend = self.repository.backend(), error = %err, "storage health check failed");
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::MailingAddress;
    use crate::persistence::InMemorySubmissionRepository;

    fn make_service() -> SubmissionService {
        SubmissionService::new(Arc::new(InMemorySubmissionRepository::new()))
    }

    fn new_submission(address: &str) -> NewSubmission {
        let Ok(address) = MailingAddress::parse(address.to_string()) else {
            panic!("valid address");
        };
        NewSubmission::new(address)
    }

    #[tokio::test]
    async fn create_returns_exact_address() {
        let service = make_service();
        let before = chrono::Utc::now();
        let Ok(submission) = service.create(new_submission("  123 Main St  ")).await else {
            panic!("create failed");
        };
        assert_eq!(submission.address.as_str(), "  123 Main St  ");
        assert!(submission.created_at >= before);
    }

    #[tokio::test]
    async fn list_sees_created_records() {
        let service = make_service();
        let Ok(created) = service.create(new_submission("123 Main St")).await else {
            panic!("create failed");
        };
        let Ok(listed) = service.list().await else {
            panic!("list failed");
        };
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn health_check_passes_for_memory_backend() {
        let service = make_service();
        assert!(service.check_storage().await.is_ok());
        assert_eq!(service.repository().backend(), "memory");
    }
}
