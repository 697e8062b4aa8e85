//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::SubmissionRepository;
use crate::service::SubmissionService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Submission service for all business logic.
    pub submission_service: Arc<SubmissionService>,
}

impl AppState {
    /// Builds the state around an already constructed repository.
    #[must_use]
    pub fn new(repository: Arc<dyn SubmissionRepository>) -> Self {
        Self {
            submission_service: Arc::new(SubmissionService::new(repository)),
        }
    }
}
